//! End-to-end search → fetch → extract tests with mocked HTTP responses

mod common;

use common::*;
use pubmed_fetcher::{ClientConfig, PubMedClient, pipeline};
use rstest::rstest;
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
#[traced_test]
async fn test_search_and_fetch_extracts_industry_authors() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &["38000001", "38000002"]).await;
    mount_efetch(&mock_server, EFETCH_TWO_ARTICLES).await;

    let client = create_mock_client(&mock_server);
    let papers = pipeline::search_and_fetch(&client, "antibody", None)
        .await
        .expect("pipeline should succeed");

    assert_eq!(papers.len(), 2);

    let industry = &papers[0];
    assert_eq!(industry.pubmed_id, "38000001");
    assert_eq!(
        industry.title.as_deref(),
        Some("Engineered antibodies against solid tumours")
    );
    assert_eq!(industry.publication_date.as_deref(), Some("2023"));
    assert_eq!(industry.non_academic_authors, vec!["Doe"]);
    assert_eq!(
        industry.company_affiliations,
        vec!["Biotech Corp, Corresponding, Email: jane@x.com"]
    );
    assert_eq!(industry.corresponding_email.as_deref(), Some("jane@x.com"));

    let academic = &papers[1];
    assert_eq!(academic.pubmed_id, "38000002");
    assert_eq!(academic.title_or_na(), "N/A");
    assert_eq!(academic.publication_date_or_na(), "N/A");
    assert_eq!(academic.non_academic_authors_joined(), "N/A");
    assert_eq!(academic.company_affiliations_joined(), "N/A");
    assert_eq!(academic.corresponding_email_or_na(), "N/A");
}

#[tokio::test]
#[traced_test]
async fn test_zero_ids_never_calls_fetch() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &[]).await;
    mount_efetch(&mock_server, EFETCH_TWO_ARTICLES).await;

    let client = create_mock_client(&mock_server);
    let papers = pipeline::search_and_fetch(&client, "no such topic", None)
        .await
        .unwrap();

    assert!(papers.is_empty());
    assert_eq!(requests_to(&mock_server, "/esearch.fcgi").await, 1);
    assert_eq!(requests_to(&mock_server, "/efetch.fcgi").await, 0);
    assert!(logs_contain("No paper IDs provided"));
}

#[tokio::test]
#[traced_test]
async fn test_search_failure_returns_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let papers = pipeline::search_and_fetch(&client, "query", Some(10)).await.unwrap();

    assert!(papers.is_empty());
    assert_eq!(requests_to(&mock_server, "/efetch.fcgi").await, 0);
    assert!(logs_contain("Error fetching paper IDs"));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_failure_returns_empty() {
    let mock_server = MockServer::start().await;
    mount_esearch(&mock_server, &["38000001"]).await;

    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let papers = pipeline::search_and_fetch(&client, "query", Some(10)).await.unwrap();

    assert!(papers.is_empty());
    assert!(logs_contain("Error fetching paper details"));
}

#[tokio::test]
#[traced_test]
async fn test_unreachable_endpoint_returns_empty() {
    // Nothing listens on port 1
    let client =
        PubMedClient::with_config(ClientConfig::new().with_base_url("http://127.0.0.1:1"));

    let ids = pipeline::fetch_paper_ids(&client, "query", Some(10)).await.unwrap();
    assert!(ids.is_empty());

    let papers = pipeline::fetch_paper_details(&client, &["38000001"])
        .await
        .unwrap();
    assert!(papers.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_malformed_envelope_is_not_swallowed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"esearchresult": {}}"#))
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let result = pipeline::fetch_paper_ids(&client, "query", Some(10)).await;

    assert!(result.is_err());
}

#[tokio::test]
#[traced_test]
async fn test_malformed_article_is_skipped() {
    let mock_server = MockServer::start().await;
    mount_efetch(&mock_server, EFETCH_MISSING_PMID).await;

    let client = create_mock_client(&mock_server);
    let papers = pipeline::fetch_paper_details(&client, &["38000003"])
        .await
        .unwrap();

    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].pubmed_id, "38000003");
    assert!(logs_contain("Skipping malformed article"));
}

#[tokio::test]
async fn test_default_result_cap_is_sent_as_retmax() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["38000001"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_mock_client(&mock_server);
    let ids = pipeline::fetch_paper_ids(&client, "antibody", None)
        .await
        .unwrap();

    assert_eq!(ids, vec!["38000001"]);
}

#[tokio::test]
async fn test_configured_result_cap_and_explicit_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PubMedClient::with_config(
        ClientConfig::new()
            .with_base_url(mock_server.uri())
            .with_max_results(25),
    );

    pipeline::fetch_paper_ids(&client, "antibody", None)
        .await
        .unwrap();
    pipeline::fetch_paper_ids(&client, "antibody", Some(3))
        .await
        .unwrap();
}

#[traced_test]
#[rstest]
#[case::no_scheme("not a url")]
#[case::broken_scheme("htp//::bad")]
#[case::space_in_host("http://exa mple.com")]
#[tokio::test]
async fn test_malformed_base_url_returns_empty(#[case] base_url: &str) {
    let client = PubMedClient::with_config(ClientConfig::new().with_base_url(base_url));

    let ids = pipeline::fetch_paper_ids(&client, "query", None)
        .await
        .expect("bad endpoint degrades to empty");
    assert!(ids.is_empty());
    assert!(logs_contain("Error fetching paper IDs"));

    let papers = pipeline::fetch_paper_details(&client, &["38000001"])
        .await
        .expect("bad endpoint degrades to empty");
    assert!(papers.is_empty());
    assert!(logs_contain("Error fetching paper details"));
}
