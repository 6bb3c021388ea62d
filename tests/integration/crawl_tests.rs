//! End-to-end crawl passes against a mock aggregator

use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use ycrawler::config::{Config, FetchConfig, ScheduleConfig, SiteConfig, StorageConfig};
use ycrawler::crawler::Coordinator;
use ycrawler::url::story_identifier;
use ycrawler::CrawlError;

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, root: &Path) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
        },
        storage: StorageConfig {
            root: root.to_path_buf(),
        },
        schedule: ScheduleConfig { pause_secs: 1 },
        fetch: FetchConfig {
            timeout_secs: 5,
            user_agent: "TestBot/1.0".to_string(),
            accept_invalid_certs: false,
        },
    }
}

fn front_page(rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(id, href)| {
            format!(
                r#"<tr class="athing submission" id="{id}">
                    <td class="title"><span class="titleline"><a href="{href}">Story {id}</a></span></td>
                </tr>
                <tr><td class="subtext"><a href="item?id={id}">comments</a></td></tr>"#
            )
        })
        .collect();
    format!("<html><body><table>{}</table></body></html>", rows)
}

fn discussion_page(top_level: &[String], nested: &[String]) -> String {
    let comment = |indent: u32, links: &[String]| -> String {
        let anchors: String = links
            .iter()
            .map(|l| format!(r#"<a href="{l}" rel="nofollow">{l}</a> "#))
            .collect();
        format!(
            r#"<tr class="athing comtr"><td><table><tr>
                <td class="ind" indent="{indent}"></td>
                <td class="default"><div class="commtext c00">{anchors}</div></td>
            </tr></table></td></tr>"#
        )
    };
    format!(
        r#"<html><body><table class="comment-tree">{}{}</table></body></html>"#,
        comment(0, top_level),
        comment(1, nested)
    )
}

async fn mount_page(server: &MockServer, page: &str, body: String, expected: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_discussion(server: &MockServer, id: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

fn coordinator(base_url: &str, root: &Path) -> Coordinator {
    Coordinator::from_config(create_test_config(base_url, root))
        .expect("Failed to create coordinator")
}

#[tokio::test]
async fn test_full_pass_writes_story_tree() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let tmp = TempDir::new().unwrap();

    let story_one = format!("{}/story/one", base_url);
    let story_two = format!("{}/story/two", base_url);

    mount_page(
        &mock_server,
        "/",
        front_page(&[("1", story_one.as_str()), ("2", story_two.as_str())]),
        1,
    )
    .await;
    mount_page(&mock_server, "/story/one", "<p>one</p>".to_string(), 1).await;
    mount_page(&mock_server, "/story/two", "<p>two</p>".to_string(), 1).await;
    mount_discussion(
        &mock_server,
        "1",
        discussion_page(
            &[format!("{}/ref/a", base_url), format!("{}/ref/b", base_url)],
            &[format!("{}/ref/nested", base_url)],
        ),
    )
    .await;
    mount_discussion(&mock_server, "2", discussion_page(&[], &[])).await;
    mount_page(&mock_server, "/ref/a", "ref a".to_string(), 1).await;
    mount_page(&mock_server, "/ref/b", "ref b".to_string(), 1).await;
    mount_page(&mock_server, "/ref/nested", "nested".to_string(), 0).await;

    let mut coordinator = coordinator(&base_url, tmp.path());
    let stats = coordinator.run_pass().await.expect("Pass failed");

    assert_eq!(stats.new_stories, 2);
    assert_eq!(stats.files_written(), 4);
    assert_eq!(coordinator.seen_count(), 2);

    let one = story_identifier(&story_one).unwrap();
    let two = story_identifier(&story_two).unwrap();
    let root = tmp.path();

    let read = |p: std::path::PathBuf| std::fs::read_to_string(p).expect("missing file");
    assert_eq!(read(root.join(&one).join(format!("{}.html", one))), "<p>one</p>");
    assert_eq!(read(root.join(&two).join(format!("{}.html", two))), "<p>two</p>");
    assert_eq!(read(root.join(&one).join("0").join("0.html")), "ref a");
    assert_eq!(read(root.join(&one).join("1").join("1.html")), "ref b");
    assert!(!root.join(&two).join("0").exists());
}

#[tokio::test]
async fn test_second_identical_pass_fetches_only_front_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let tmp = TempDir::new().unwrap();

    let story = format!("{}/story/only", base_url);
    mount_page(&mock_server, "/", front_page(&[("7", story.as_str())]), 2).await;
    mount_page(&mock_server, "/story/only", "only".to_string(), 1).await;
    mount_discussion(&mock_server, "7", discussion_page(&[], &[])).await;

    let mut coordinator = coordinator(&base_url, tmp.path());

    let first = coordinator.run_pass().await.expect("First pass failed");
    let second = coordinator.run_pass().await.expect("Second pass failed");

    assert_eq!(first.new_stories, 1);
    assert_eq!(second.discovered, 1);
    assert_eq!(second.new_stories, 0);
    assert_eq!(second.files_written(), 0);
    assert_eq!(coordinator.seen_count(), 1);
}

#[tokio::test]
async fn test_failing_story_and_link_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let tmp = TempDir::new().unwrap();

    let good = format!("{}/story/good", base_url);
    let bad = format!("{}/story/bad", base_url);

    mount_page(&mock_server, "/", front_page(&[("1", good.as_str()), ("2", bad.as_str())]), 1).await;
    mount_page(&mock_server, "/story/good", "good".to_string(), 1).await;
    Mock::given(method("GET"))
        .and(path("/story/bad"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_discussion(
        &mock_server,
        "1",
        discussion_page(
            &[
                format!("{}/ref/0", base_url),
                format!("{}/ref/gone", base_url),
                format!("{}/ref/2", base_url),
            ],
            &[],
        ),
    )
    .await;
    mount_discussion(&mock_server, "2", discussion_page(&[], &[])).await;
    mount_page(&mock_server, "/ref/0", "zero".to_string(), 1).await;
    Mock::given(method("GET"))
        .and(path("/ref/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ref/2", "two".to_string(), 1).await;

    let mut coordinator = coordinator(&base_url, tmp.path());
    let stats = coordinator.run_pass().await.expect("Pass failed");

    assert_eq!(stats.stories_saved, 1);
    assert_eq!(stats.stories_failed, 1);
    assert_eq!(stats.sub_links_saved, 2);
    assert_eq!(stats.sub_links_failed, 1);

    let good_dir = tmp.path().join(story_identifier(&good).unwrap());
    let bad_id = story_identifier(&bad).unwrap();
    assert!(!tmp.path().join(&bad_id).join(format!("{}.html", bad_id)).exists());
    assert!(good_dir.join("0").join("0.html").exists());
    assert!(!good_dir.join("1").exists());
    assert!(good_dir.join("2").join("2.html").exists());
}

#[tokio::test]
async fn test_front_page_failure_aborts_pass() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let tmp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(&base_url, tmp.path());
    let result = coordinator.run_pass().await;

    assert!(matches!(result, Err(CrawlError::Transport(_))));
    assert_eq!(coordinator.seen_count(), 0);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_relative_story_link_uses_base_url() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let tmp = TempDir::new().unwrap();

    mount_page(&mock_server, "/", front_page(&[("9", "item?id=9")]), 1).await;
    // The story page and the discussion page are the same URL here.
    Mock::given(method("GET"))
        .and(path("/item"))
        .and(query_param("id", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_string(discussion_page(&[], &[])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut coordinator = coordinator(&base_url, tmp.path());
    let stats = coordinator.run_pass().await.expect("Pass failed");

    let id = story_identifier(&format!("{}/item?id=9", base_url)).unwrap();
    assert_eq!(stats.stories_saved, 1);
    assert!(tmp.path().join(&id).join(format!("{}.html", id)).exists());
}
