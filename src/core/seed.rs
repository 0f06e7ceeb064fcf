//! Bundled sample listings served when the remote store cannot be used.

use crate::core::listing::{ListingRecord, ListingStatus, PropertyType};

struct SeedListing {
    id: &'static str,
    title: &'static str,
    price_range: &'static str,
    location: &'static str,
    property_type: PropertyType,
    status: ListingStatus,
    beds: Option<u32>,
    baths: Option<u32>,
    sqft: u32,
    image: &'static str,
    description: &'static str,
}

const SEED: [SeedListing; 6] = [
    SeedListing {
        id: "1",
        title: "Luxury Residence at Mirpur DOHS",
        price_range: "৳ 2.5 Cr - 3.8 Cr",
        location: "Mirpur DOHS, Dhaka",
        property_type: PropertyType::Residential,
        status: ListingStatus::ForSale,
        beds: Some(4),
        baths: Some(4),
        sqft: 2200,
        image: "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?auto=format&fit=crop&q=80&w=800",
        description: "Exclusive south-facing apartment with modern amenities in the secure and elite neighborhood of Mirpur DOHS.",
    },
    SeedListing {
        id: "2",
        title: "Purbachal 300ft Road Plot",
        price_range: "৳ 80 Lac - 1.5 Cr",
        location: "Purbachal 300ft, Dhaka",
        property_type: PropertyType::Land,
        status: ListingStatus::ForSale,
        beds: None,
        baths: None,
        sqft: 3600,
        image: "https://images.unsplash.com/photo-1500382017468-9049fed747ef?auto=format&fit=crop&q=80&w=800",
        description: "Prime location plot near the 300ft highway, ideal for high-yield investment or residential construction.",
    },
    SeedListing {
        id: "3",
        title: "Trust Green City Smart Home",
        price_range: "৳ 1.2 Cr - 1.8 Cr",
        location: "Trust Green City, Dhaka Cantonment",
        property_type: PropertyType::Residential,
        status: ListingStatus::ForSale,
        beds: Some(3),
        baths: Some(3),
        sqft: 1650,
        image: "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?auto=format&fit=crop&q=80&w=800",
        description: "Sustainable living in the heart of Dhaka Cantonment area. High security and green surroundings.",
    },
    SeedListing {
        id: "4",
        title: "Shagupta Lakeview Residency",
        price_range: "৳ 95 Lac - 1.4 Cr",
        location: "Shagupta, Dhaka",
        property_type: PropertyType::Residential,
        status: ListingStatus::Constructing,
        beds: Some(3),
        baths: Some(3),
        sqft: 1800,
        image: "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?auto=format&fit=crop&q=80&w=800",
        description: "Ongoing project with modern architectural design overlooking the serene Shagupta lakes.",
    },
    SeedListing {
        id: "5",
        title: "Commercial Space at ECB Chattor",
        price_range: "৳ 45k - 85k / month",
        location: "ECB Chattor, Dhaka",
        property_type: PropertyType::Commercial,
        status: ListingStatus::ForRent,
        beds: None,
        baths: None,
        sqft: 1200,
        image: "https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&q=80&w=800",
        description: "Perfect for retail or corporate offices, situated at the busy junction of ECB Chattor.",
    },
    SeedListing {
        id: "6",
        title: "Premium Plot at Sector 1, Purbachal",
        price_range: "৳ 1.5 Cr - 2.2 Cr",
        location: "Sector 1, Purbachal, Dhaka",
        property_type: PropertyType::Land,
        status: ListingStatus::ForSale,
        beds: None,
        baths: None,
        sqft: 4320,
        image: "https://images.unsplash.com/photo-1599809275671-b5942cacc7a1?auto=format&fit=crop&q=80&w=800",
        description: "Large corner plot available for immediate registration and construction.",
    },
];

impl From<&SeedListing> for ListingRecord {
    fn from(seed: &SeedListing) -> Self {
        ListingRecord {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            price_range: seed.price_range.to_string(),
            location: seed.location.to_string(),
            property_type: seed.property_type,
            status: seed.status,
            beds: seed.beds,
            baths: seed.baths,
            sqft: seed.sqft,
            image: Some(seed.image.to_string()),
            gallery: Vec::new(),
            brochure: None,
            features: None,
            description: seed.description.to_string(),
        }
    }
}

/// The fallback catalog, in its bundled order.
pub fn seed_catalog() -> Vec<ListingRecord> {
    SEED.iter().map(ListingRecord::from).collect()
}
