use homelist::cli::listings::ListArgs;
use homelist::core::activity::ActivityCategory;
use homelist::core::lead::Lead;
use homelist::{AdminCommand, AppCommand};
use serde_json::json;
use std::fs;
use tempfile::NamedTempFile;

mod test_utils {
    use serde_json::Value;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const DOCS_PATH: &str = "/v1/collections/projects/documents";

    pub async fn create_store_mock_server(status_code: u16, body: Value) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOCS_PATH))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    pub fn http_store_config(base_url: &str) -> String {
        format!(
            r#"
store:
  kind: http
  base_url: "{base_url}"
  api_key: "test-key"
"#
        )
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), content).expect("Failed to write config file");
    config_file
}

async fn run(command: AppCommand, config_file: &NamedTempFile) -> anyhow::Result<()> {
    homelist::run_command(command, Some(config_file.path().to_str().unwrap())).await
}

#[test_log::test(tokio::test)]
async fn test_list_with_facets_on_seed_catalog() {
    let config_file = write_config("data_path: null");

    let args = ListArgs {
        property_type: Some("Land".to_string()),
        budget: Some("1 Crore - 2 Crore".to_string()),
        ..Default::default()
    };
    let result = run(AppCommand::List(args), &config_file).await;
    assert!(result.is_ok(), "List failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_list_rejects_hidden_facet() {
    let config_file = write_config("facets:\n  status: false\n");

    let args = ListArgs {
        status: Some("For Sale".to_string()),
        ..Default::default()
    };
    let result = run(AppCommand::List(args), &config_file).await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_remote_store() {
    let mock_server = test_utils::create_store_mock_server(
        200,
        json!({
            "documents": [
                {
                    "id": "r1",
                    "fields": {
                        "title": "Bashundhara Corner Plot",
                        "priceRange": "৳ 1.6 Cr",
                        "location": "Purbachal",
                        "type": "Land",
                        "status": "For Sale",
                        "sqft": 2880
                    }
                }
            ]
        }),
    )
    .await;
    let config_file = write_config(&test_utils::http_store_config(&mock_server.uri()));

    let result = run(AppCommand::List(ListArgs::default()), &config_file).await;
    assert!(result.is_ok(), "List failed with: {:?}", result.err());

    let result = run(AppCommand::Featured { limit: 3 }, &config_file).await;
    assert!(result.is_ok(), "Featured failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_store_failure_falls_back_to_seed() {
    let mock_server = test_utils::create_store_mock_server(500, json!({ "error": "down" })).await;
    let config_file = write_config(&test_utils::http_store_config(&mock_server.uri()));

    let result = run(AppCommand::List(ListArgs::default()), &config_file).await;
    assert!(result.is_ok(), "List failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_show_seed_listing_without_store() {
    let config_file = write_config("data_path: null");

    let result = run(AppCommand::Show { id: "4".to_string() }, &config_file).await;
    assert!(result.is_ok(), "Show failed with: {:?}", result.err());

    let result = run(AppCommand::Show { id: "missing".to_string() }, &config_file).await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_admin_flow_with_remote_store() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = test_utils::create_store_mock_server(200, json!({ "documents": [] })).await;
    Mock::given(method("POST"))
        .and(path(test_utils::DOCS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "new-id" })))
        .expect(6)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/collections/leads/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "lead-id" })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/collections/leads/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {
                    "id": "lead-id",
                    "fields": {
                        "name": "Nusrat",
                        "email": "nusrat@example.com",
                        "message": "Please send the brochure",
                        "timestamp": "2026-03-01T10:30:00+00:00"
                    }
                }
            ]
        })))
        .mount(&mock_server)
        .await;
    let config_file = write_config(&test_utils::http_store_config(&mock_server.uri()));

    let result = run(AppCommand::Admin(AdminCommand::Seed), &config_file).await;
    assert!(result.is_ok(), "Seed failed with: {:?}", result.err());

    let lead = Lead {
        name: "Nusrat".to_string(),
        email: "nusrat@example.com".to_string(),
        phone: Some("+880 1711 000000".to_string()),
        message: "Please send the brochure".to_string(),
    };
    let result = run(AppCommand::Contact(lead), &config_file).await;
    assert!(result.is_ok(), "Contact failed with: {:?}", result.err());

    let result = run(AppCommand::Admin(AdminCommand::Leads), &config_file).await;
    assert!(result.is_ok(), "Leads failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_admin_requires_store() {
    let config_file = write_config("data_path: null");

    let result = run(AppCommand::Admin(AdminCommand::Leads), &config_file).await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_activities_from_remote_store() {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/collections/activities/documents"))
        .and(query_param("orderBy", "createdAt"))
        .and(query_param("direction", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {
                    "id": "a1",
                    "fields": {
                        "title": "Rooftop casting, Tower B",
                        "category": "Gallery",
                        "imageUrl": "https://img/tower-b.jpg",
                        "createdAt": "2026-03-01T10:30:00.000Z"
                    }
                }
            ]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;
    let config_file = write_config(&test_utils::http_store_config(&mock_server.uri()));

    for category in ActivityCategory::ALL {
        let result = run(AppCommand::Activities { category }, &config_file).await;
        assert!(result.is_ok(), "Activities failed with: {:?}", result.err());
    }
}

#[test_log::test(tokio::test)]
async fn test_activities_without_store_show_empty_state() {
    let config_file = write_config("data_path: null");

    let result = run(
        AppCommand::Activities {
            category: ActivityCategory::Blog,
        },
        &config_file,
    )
    .await;
    assert!(result.is_ok(), "Activities failed with: {:?}", result.err());
}
