// tests/source_fallback.rs
//
// Catalog resolution against a real HTTP server and real files.
//
use std::io::Write;
use tempfile::NamedTempFile;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ztc_catalog::{
    CartStore, CatalogError, CatalogOrigin, CatalogPage, FileSource, FilterState, HtmlTable,
    HttpSource, MemoryStore, SourceResolver,
};

const LOCAL_CSV: &str = "Course,Term,Section,Instructor\n\
                         MATH 101,Fall 2025,001,Lee\n\
                         ENGL 1,Fall 2025,002,\"Smith, J.\"\"\"\n";

async fn sheet(status: u16, body: &str) -> (MockServer, Url) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pub"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    let url = Url::parse(&format!("{}/pub", server.uri())).unwrap();
    (server, url)
}

fn local_file(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(contents.as_bytes()).unwrap();
    tmp
}

#[tokio::test]
async fn remote_404_falls_back_to_local_file() {
    let (_server, url) = sheet(404, "not found").await;
    let local = local_file(LOCAL_CSV);

    let resolver = SourceResolver::new()
        .with_source(HttpSource::new(reqwest::Client::new(), url))
        .with_source(FileSource::new(local.path()));

    let resolved = resolver.resolve().await.unwrap();
    assert_eq!(resolved.source, local.path().display().to_string());

    let records = resolved.table.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].course, "MATH 101");
    assert_eq!(records[1].instructor, "Smith, J.\"");
}

#[tokio::test]
async fn remote_success_wins_over_local() {
    let (_server, url) = sheet(200, "course,section\nART 1,020\n").await;
    let local = local_file(LOCAL_CSV);
    let label = url.to_string();

    let resolver = SourceResolver::new()
        .with_source(HttpSource::new(reqwest::Client::new(), url))
        .with_source(FileSource::new(local.path()));

    let resolved = resolver.resolve().await.unwrap();
    assert_eq!(resolved.source, label);
    assert_eq!(resolved.table.records()[0].section, "020");
}

#[tokio::test]
async fn remote_empty_body_is_a_failure() {
    let (_server, url) = sheet(200, "\n").await;
    let local = local_file(LOCAL_CSV);

    let resolver = SourceResolver::new()
        .with_source(HttpSource::new(reqwest::Client::new(), url))
        .with_source(FileSource::new(local.path()));

    let resolved = resolver.resolve().await.unwrap();
    assert_eq!(resolved.table.rows.len(), 2);
    assert_ne!(resolved.source, "");
}

#[tokio::test]
async fn both_sources_failing_signals_no_data() {
    let (_server, url) = sheet(500, "boom").await;
    let dir = tempfile::tempdir().unwrap();

    let resolver = SourceResolver::new()
        .with_source(HttpSource::new(reqwest::Client::new(), url))
        .with_source(FileSource::new(dir.path().join("ztc_live.csv")));

    let err = resolver.resolve().await.unwrap_err();
    let CatalogError::NoDataAvailable { attempted } = err;
    assert_eq!(attempted.len(), 2);
}

#[tokio::test]
async fn page_hydrates_rendered_table_when_sources_fail() {
    let (_server, url) = sheet(404, "").await;
    let dir = tempfile::tempdir().unwrap();
    let html = local_file(
        r#"<table id="courseTable">
             <thead><tr><th>Course</th><th>Section</th><th>Instructor</th></tr></thead>
             <tbody>
               <tr><td>BIO 3</td><td>020</td><td>Kim</td></tr>
               <tr><td>CHEM 1</td><td>005</td><td>Ng</td></tr>
             </tbody>
           </table>"#,
    );

    let resolver = SourceResolver::new()
        .with_source(HttpSource::new(reqwest::Client::new(), url))
        .with_source(FileSource::new(dir.path().join("missing.csv")));
    let fallback = HtmlTable::new(html.path(), "#courseTable");
    let store = MemoryStore::new();
    let page = CatalogPage::open(
        &resolver,
        Some(&fallback),
        CartStore::new(store.clone(), "wlacZtcCartV1"),
    )
    .await;

    assert!(matches!(page.origin(), CatalogOrigin::RenderedTable(_)));

    let record = page.find("CHEM 1", "005").unwrap();
    page.select(&record).unwrap();

    let view = page.view(&FilterState::default());
    assert_eq!(view.len(), 2);
    assert!(!view.rows[0].in_cart);
    assert!(view.rows[1].in_cart);
}

#[tokio::test]
async fn page_without_any_data_is_empty_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let resolver =
        SourceResolver::new().with_source(FileSource::new(dir.path().join("missing.csv")));
    let fallback = HtmlTable::new(dir.path().join("missing.html"), "#courseTable");

    let page = CatalogPage::open(
        &resolver,
        Some(&fallback),
        CartStore::new(MemoryStore::new(), "wlacZtcCartV1"),
    )
    .await;

    assert_eq!(page.origin(), &CatalogOrigin::Empty);
    assert!(page.view(&FilterState::new("Fall 2025", "math")).is_empty());
}
