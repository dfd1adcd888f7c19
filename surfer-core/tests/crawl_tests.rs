// End-to-end crawl tests over HTTP

use surfer_core::crawl::{CrawlOptions, execute_crawl};
use surfer_scanner::{LinkFilter, TraversalMode};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_bytes(body.into_bytes()),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_page_site_over_http() {
    let server = MockServer::start().await;
    let uri = server.uri();

    let root_html = format!(
        r#"<html><body>
            <a href="/page1">one</a>
            <a href="{uri}/page2">two</a>
            <a href="/page3/">three</a>
            <a href="/banner.jpg">image</a>
        </body></html>"#
    );
    mount_page(&server, "/", root_html).await;
    for page in ["/page1", "/page2", "/page3"] {
        mount_page(&server, page, "<html><body>leaf</body></html>".to_string()).await;
    }

    let outcome = execute_crawl(CrawlOptions::new(uri.clone(), 4)).await.unwrap();

    assert_eq!(
        outcome.nodes,
        vec![
            uri.clone(),
            format!("{uri}/page1"),
            format!("{uri}/page2"),
            format!("{uri}/page3"),
        ]
    );
    assert_eq!(outcome.edge_count(), 3);
    for target in &outcome.nodes[1..] {
        assert!(outcome.graph.contains_edge(&uri, target));
    }
    assert!(outcome.bad_links.is_empty());
}

#[tokio::test]
async fn test_http_errors_become_bad_links() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/gone">gone</a><a href="/ok">ok</a>"#.to_string(),
    )
    .await;
    mount_page(&server, "/ok", "<p>ok</p>".to_string()).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut options = CrawlOptions::new(uri.clone(), 3);
    options.mode = TraversalMode::Frontier;
    options.timeout_secs = 5;
    let outcome = execute_crawl(options).await.unwrap();

    assert_eq!(outcome.bad_links, vec![format!("{uri}/gone")]);
    assert_eq!(outcome.nodes, vec![uri.clone(), format!("{uri}/ok")]);
    assert!(!outcome.graph.contains_node(&format!("{uri}/gone")));
}

#[tokio::test]
async fn test_unreachable_seed_over_http() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let mut options = CrawlOptions::new(uri.clone(), 1);
    options.timeout_secs = 2;
    let outcome = execute_crawl(options).await.unwrap();

    assert!(outcome.nodes.is_empty());
    assert_eq!(outcome.bad_links, vec![uri]);
}

#[tokio::test]
async fn test_default_filter_rejects_https_links() {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="https://secure.example.com/page">s</a>"#.to_string(),
    )
    .await;

    let mut options = CrawlOptions::new(uri.clone(), 5);
    options.filter = LinkFilter::default();
    let outcome = execute_crawl(options).await.unwrap();

    assert_eq!(outcome.nodes, vec![uri]);
    assert_eq!(outcome.edge_count(), 0);
}
