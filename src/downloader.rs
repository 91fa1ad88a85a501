use crate::error::DownloaderError;
use crate::progress::{ProgressSink, TaskKind, TaskUpdate};
use crate::remote::Fetch;
use crate::types::{CandidateItem, DownloadReport, DownloadSummary, DownloadTask, TaskState};
use futures::StreamExt;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

const FINISHED: &str = "Download finished.";
const STATS_FILE: &str = "download_stats.csv";
const PARTIAL_SUFFIX: &str = ".partial";

pub struct Downloader<F> {
    fetcher: F,
    parallelism: Option<usize>,
}

impl<F: Fetch> Downloader<F> {
    /// `parallelism` caps concurrent downloads; `None` starts them all at once.
    pub fn new(fetcher: F, parallelism: Option<usize>) -> Self {
        Self {
            fetcher,
            parallelism: parallelism.filter(|&n| n > 0),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Downloads every item into `output_dir` and waits for all of them to
    /// finish. A failed item never stops its siblings; failures are listed in
    /// the returned summary.
    pub async fn download_all(
        &self,
        items: Vec<CandidateItem>,
        output_dir: &Path,
        progress: &ProgressSink,
    ) -> DownloadSummary {
        let tasks = self.create_download_tasks(items, output_dir);
        let start_time = Instant::now();

        for task in &tasks {
            progress.add_task(task.id(), TaskKind::Percentage);
        }

        let downloads = tasks
            .into_iter()
            .enumerate()
            .map(|(i, task)| async move { (i, self.download_file(task, progress).await) });

        let mut results: Vec<(usize, DownloadReport)> = match self.parallelism {
            Some(n) => {
                futures::stream::iter(downloads)
                    .buffer_unordered(n)
                    .collect()
                    .await
            }
            None => futures::future::join_all(downloads).await,
        };
        results.sort_by_key(|(i, _)| *i);
        let reports: Vec<DownloadReport> = results.into_iter().map(|(_, r)| r).collect();

        let total_downloads = reports.len();
        let successful_downloads = reports
            .iter()
            .filter(|r| r.state() == TaskState::Done)
            .count();
        let total_bytes_downloaded: u64 = reports.iter().map(|r| r.task.bytes_received).sum();

        let summary = DownloadSummary {
            total_downloads,
            successful_downloads,
            failed_downloads: total_downloads - successful_downloads,
            total_bytes_downloaded,
            total_duration: start_time.elapsed(),
            reports,
        };

        let rows = stats_rows(&summary);
        let stats_path = output_dir.join(STATS_FILE);
        match tokio::task::spawn_blocking(move || write_stats_csv(&stats_path, &rows)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Failed to write stats CSV: {}", e),
            Err(e) => error!("Stats CSV writer stopped: {}", e),
        }

        summary
    }

    /// Streams one item to its destination path and settles the task as
    /// Done or Failed. Bytes go to `<destination>.partial` first, so a
    /// failure never touches a file already at the destination.
    pub async fn download_file(&self, mut task: DownloadTask, progress: &ProgressSink) -> DownloadReport {
        let start_time = Instant::now();
        let id = task.id().to_string();
        info!("Starting download: {}", task.item.download_link);

        let result = self.stream_to_file(&mut task, progress).await;

        let error = match result {
            Ok(()) => {
                task.finish();
                progress.done(&id, FINISHED);
                info!("Finished {} ({} bytes)", id, task.bytes_received);
                None
            }
            Err(e) => {
                task.fail();
                let error_msg = e.to_string();
                error!("Download failed for {}: {}", task.item.download_link, error_msg);
                progress.fail(&id, &error_msg);
                if let Some(partial) = task.partial_path.take() {
                    remove_partial(&partial).await;
                }
                Some(error_msg)
            }
        };

        DownloadReport {
            task,
            duration: start_time.elapsed(),
            error,
        }
    }

    async fn stream_to_file(
        &self,
        task: &mut DownloadTask,
        progress: &ProgressSink,
    ) -> Result<(), DownloaderError> {
        task.start();
        let resp = self.fetcher.get(&task.item.download_link).await?;

        if !resp.is_success() {
            return Err(DownloaderError::ResourceUnreadable {
                status: resp.status,
            });
        }
        task.bytes_expected = resp.content_length;

        let id = task.id().to_string();
        let partial = partial_path(&task.destination_path);
        let mut file = File::create(&partial).await?;
        task.partial_path = Some(partial);
        let mut stream = resp.body;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            let received = task.record(chunk.len() as u64);

            let update = match task.fraction() {
                Some(p) => TaskUpdate::Percentage(p),
                None => TaskUpdate::Bytes(received),
            };
            progress.update_task(&id, update);
        }
        file.flush().await?;
        drop(file);

        if let Some(expected) = task.bytes_expected {
            if expected != task.bytes_received {
                return Err(DownloaderError::SizeMismatch {
                    expected,
                    received: task.bytes_received,
                });
            }
            // Empty bodies never produced a chunk event.
            if expected == 0 {
                progress.update_task(&id, TaskUpdate::Percentage(1.0));
            }
        }

        if let Some(partial) = &task.partial_path {
            tokio::fs::rename(partial, &task.destination_path).await?;
        }
        task.partial_path = None;
        Ok(())
    }

    /// One task per item. Repeated names get the item's position appended so
    /// every task owns a distinct file and progress id.
    fn create_download_tasks(&self, items: Vec<CandidateItem>, output_dir: &Path) -> Vec<DownloadTask> {
        info!("Creating download tasks for {} datasets", items.len());
        let mut taken: HashSet<String> = HashSet::new();
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let base = file_name(&item.title);
                let mut name = base.clone();
                let mut n = i + 1;
                while taken.contains(&name) || taken.contains(&format!("{}{}", name, PARTIAL_SUFFIX)) {
                    name = format!("{}_{}", base, n);
                    n += 1;
                }
                taken.insert(format!("{}{}", name, PARTIAL_SUFFIX));
                taken.insert(name.clone());
                let output_path = output_dir.join(name);
                debug!("Download task: {} -> {}", item.download_link, output_path.display());
                DownloadTask::new(item, output_path)
            })
            .collect()
    }
}

// Titles come from the catalog; keep them inside the destination directory.
fn file_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    match name.as_str() {
        "" | "." | ".." => "unnamed".to_string(),
        _ => name,
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial file {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove partial file {}: {}", path.display(), e),
    }
}

const STATS_HEADER: [&str; 7] = [
    "Filename",
    "Status",
    "Size (MB)",
    "Duration (s)",
    "Speed (MB/s)",
    "URL",
    "Error",
];

fn stats_rows(summary: &DownloadSummary) -> Vec<[String; 7]> {
    summary
        .reports
        .iter()
        .map(|report| {
            let size_mb = report.task.bytes_received as f64 / 1_048_576.0;
            let duration_secs = report.duration.as_secs_f64();
            let speed_mbs = if duration_secs > 0.0 {
                size_mb / duration_secs
            } else {
                0.0
            };

            [
                report.file_name().to_string(),
                format!("{:?}", report.state()),
                format!("{:.2}", size_mb),
                format!("{:.2}", duration_secs),
                format!("{:.2}", speed_mbs),
                report.task.item.download_link.clone(),
                report.error.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

// Blocking; run it off the async workers.
fn write_stats_csv(stats_path: &Path, rows: &[[String; 7]]) -> Result<(), DownloaderError> {
    let mut wtr = csv::WriterBuilder::new().from_path(stats_path)?;
    wtr.write_record(STATS_HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{ProgressEvent, ProgressHub, RecordingObserver};
    use crate::remote::mock::{MockFetch, MockResponse};
    use chrono::{TimeZone, Utc};

    fn item(title: &str, day: u32) -> CandidateItem {
        CandidateItem {
            title: title.to_string(),
            ingestion_date: Utc.with_ymd_and_hms(2021, 3, day, 0, 0, 0).unwrap(),
            download_link: format!("https://hub/odata/{}/$value", title),
        }
    }

    fn body(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn last_update(observer: &RecordingObserver, id: &str) -> Option<TaskUpdate> {
        observer
            .events_for(id)
            .into_iter()
            .rev()
            .find_map(|e| match e {
                ProgressEvent::Updated { update, .. } => Some(*update),
                _ => None,
            })
    }

    #[tokio::test]
    async fn test_known_size_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data = body(10_000);
        let it = item("S5P_A", 1);
        let fetcher = MockFetch::new().with(&it.download_link, MockResponse::ok(&data, 1024));
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(vec![it], dir.path(), &hub.sink()).await;
        let observer = hub.await_all_settled().await.unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.total_bytes_downloaded, 10_000);
        assert_eq!(std::fs::read(dir.path().join("S5P_A")).unwrap(), data);

        match last_update(&observer, "S5P_A") {
            Some(TaskUpdate::Percentage(p)) => assert!((p - 1.0).abs() < f64::EPSILON),
            other => panic!("expected a percentage, got {:?}", other),
        }
        assert!(observer.events_for("S5P_A").contains(&&ProgressEvent::Done {
            id: "S5P_A".to_string(),
            message: FINISHED.to_string(),
        }));
    }

    #[tokio::test]
    async fn test_unknown_size_reports_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let data = body(3000);
        let it = item("S5P_A", 1);
        let fetcher = MockFetch::new().with(
            &it.download_link,
            MockResponse::ok(&data, 1000).without_length(),
        );
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(vec![it], dir.path(), &hub.sink()).await;
        let observer = hub.await_all_settled().await.unwrap();

        assert!(summary.is_success());
        let updates: Vec<TaskUpdate> = observer
            .events_for("S5P_A")
            .into_iter()
            .filter_map(|e| match e {
                ProgressEvent::Updated { update, .. } => Some(*update),
                _ => None,
            })
            .collect();
        assert_eq!(
            updates,
            vec![
                TaskUpdate::Bytes(1000),
                TaskUpdate::Bytes(2000),
                TaskUpdate::Bytes(3000)
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_body_with_known_size() {
        let dir = tempfile::tempdir().unwrap();
        let it = item("S5P_EMPTY", 1);
        let fetcher = MockFetch::new().with(&it.download_link, MockResponse::ok(b"", 1));
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(vec![it], dir.path(), &hub.sink()).await;
        let observer = hub.await_all_settled().await.unwrap();

        assert!(summary.is_success());
        assert_eq!(std::fs::metadata(dir.path().join("S5P_EMPTY")).unwrap().len(), 0);
        assert_eq!(
            last_update(&observer, "S5P_EMPTY"),
            Some(TaskUpdate::Percentage(1.0))
        );
    }

    #[tokio::test]
    async fn test_middle_item_fails_others_complete() {
        let dir = tempfile::tempdir().unwrap();
        let items = vec![item("S5P_1", 1), item("S5P_2", 2), item("S5P_3", 3)];
        let fetcher = MockFetch::new()
            .with(&items[0].download_link, MockResponse::ok(&body(500), 100))
            .with(&items[1].download_link, MockResponse::status(404))
            .with(&items[2].download_link, MockResponse::ok(&body(700), 100));
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(items, dir.path(), &hub.sink()).await;
        let observer = hub.await_all_settled().await.unwrap();

        let states: Vec<TaskState> = summary.reports.iter().map(|r| r.state()).collect();
        assert_eq!(states, vec![TaskState::Done, TaskState::Failed, TaskState::Done]);
        assert_eq!(summary.successful_downloads, 2);
        assert_eq!(summary.failed_downloads, 1);
        assert!(!summary.is_success());

        let failed: Vec<&str> = summary.failures().map(|r| r.file_name()).collect();
        assert_eq!(failed, vec!["S5P_2"]);
        assert_eq!(
            summary.reports[1].error.as_deref(),
            Some("Cannot read remote resource (HTTP 404)")
        );

        assert!(dir.path().join("S5P_1").exists());
        assert!(!dir.path().join("S5P_2").exists());
        assert!(dir.path().join("S5P_3").exists());

        assert_eq!(observer.added_ids(), vec!["S5P_1", "S5P_2", "S5P_3"]);
        assert!(observer
            .events_for("S5P_2")
            .iter()
            .any(|e| matches!(e, ProgressEvent::Failed { .. })));
        assert!(!observer
            .events_for("S5P_2")
            .iter()
            .any(|e| matches!(e, ProgressEvent::Done { .. })));
    }

    #[tokio::test]
    async fn test_stream_error_fails_without_completion() {
        let dir = tempfile::tempdir().unwrap();
        let it = item("S5P_CUT", 1);
        let mut resp = MockResponse::ok(&body(2000), 500);
        resp.chunks.truncate(2);
        resp.chunks.push(Err("connection reset by peer".to_string()));
        let fetcher = MockFetch::new().with(&it.download_link, resp);
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let report = downloader.download_file(
            DownloadTask::new(it, dir.path().join("S5P_CUT")),
            &hub.sink(),
        )
        .await;
        let observer = hub.await_all_settled().await.unwrap();

        assert_eq!(report.state(), TaskState::Failed);
        assert_eq!(report.task.bytes_received, 1000);
        assert_eq!(
            report.error.as_deref(),
            Some("Download failed: connection reset by peer")
        );
        assert!(!dir.path().join("S5P_CUT").exists());
        assert!(!dir.path().join("S5P_CUT.partial").exists());
        assert!(!observer
            .events
            .iter()
            .any(|e| matches!(e, ProgressEvent::Done { .. })));
    }

    #[tokio::test]
    async fn test_short_body_is_size_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let it = item("S5P_SHORT", 1);
        let mut resp = MockResponse::ok(&body(100), 10);
        resp.content_length = Some(200);
        let fetcher = MockFetch::new().with(&it.download_link, resp);
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(vec![it], dir.path(), &hub.sink()).await;
        hub.await_all_settled().await.unwrap();

        assert_eq!(summary.failed_downloads, 1);
        assert_eq!(
            summary.reports[0].error.as_deref(),
            Some("Size mismatch: expected 200 bytes, received 100")
        );
    }

    #[tokio::test]
    async fn test_unreachable_link_fails() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(MockFetch::new(), None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader
            .download_all(vec![item("S5P_GONE", 1)], dir.path(), &hub.sink())
            .await;
        hub.await_all_settled().await.unwrap();

        assert_eq!(summary.reports[0].state(), TaskState::Failed);
    }

    #[tokio::test]
    async fn test_all_tasks_reach_terminal_state() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<CandidateItem> = (1..=8).map(|n| item(&format!("S5P_{}", n), n)).collect();
        let mut fetcher = MockFetch::new();
        for (n, it) in items.iter().enumerate() {
            let resp = if n % 3 == 0 {
                MockResponse::status(503)
            } else {
                MockResponse::ok(&body(256), 64)
            };
            fetcher = fetcher.with(&it.download_link, resp);
        }
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(items, dir.path(), &hub.sink()).await;
        let observer = hub.await_all_settled().await.unwrap();

        assert_eq!(summary.total_downloads, 8);
        assert!(summary.reports.iter().all(|r| r.state().is_terminal()));
        assert_eq!(summary.failed_downloads, 3);
        assert!(downloader.fetcher().peak_concurrency() > 1);
        assert!(observer.settled);
    }

    #[tokio::test]
    async fn test_bounded_parallelism() {
        let dir = tempfile::tempdir().unwrap();
        let items: Vec<CandidateItem> = (1..=6).map(|n| item(&format!("S5P_{}", n), n)).collect();
        let fetcher = items.iter().fold(MockFetch::new(), |f, it| {
            f.with(&it.download_link, MockResponse::ok(&body(300), 50))
        });
        let downloader = Downloader::new(fetcher, Some(2));
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(items, dir.path(), &hub.sink()).await;
        hub.await_all_settled().await.unwrap();

        assert!(summary.is_success());
        assert!(downloader.fetcher().peak_concurrency() <= 2);
        let names: Vec<&str> = summary.reports.iter().map(|r| r.file_name()).collect();
        assert_eq!(names, vec!["S5P_1", "S5P_2", "S5P_3", "S5P_4", "S5P_5", "S5P_6"]);
    }

    #[tokio::test]
    async fn test_stats_csv_written() {
        let dir = tempfile::tempdir().unwrap();
        let items = vec![item("S5P_1", 1), item("S5P_2", 2)];
        let fetcher = MockFetch::new()
            .with(&items[0].download_link, MockResponse::ok(&body(10), 5))
            .with(&items[1].download_link, MockResponse::status(500));
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        downloader.download_all(items, dir.path(), &hub.sink()).await;
        hub.await_all_settled().await.unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(STATS_FILE)).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "S5P_1");
        assert_eq!(&rows[0][1], "Done");
        assert_eq!(&rows[1][1], "Failed");
        assert_eq!(&rows[1][6], "Cannot read remote resource (HTTP 500)");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("S5P_A");
        std::fs::write(&existing, b"good data from last run").unwrap();

        let it = item("S5P_A", 1);
        let fetcher = MockFetch::new().with(&it.download_link, MockResponse::status(503));
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(vec![it], dir.path(), &hub.sink()).await;
        hub.await_all_settled().await.unwrap();

        assert_eq!(summary.reports[0].state(), TaskState::Failed);
        assert_eq!(std::fs::read(&existing).unwrap(), b"good data from last run");
    }

    #[tokio::test]
    async fn test_interrupted_stream_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("S5P_A");
        std::fs::write(&existing, b"good data from last run").unwrap();

        let it = item("S5P_A", 1);
        let mut resp = MockResponse::ok(&body(100), 10);
        resp.chunks.truncate(3);
        resp.chunks.push(Err("timed out".to_string()));
        let fetcher = MockFetch::new().with(&it.download_link, resp);
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(vec![it], dir.path(), &hub.sink()).await;
        hub.await_all_settled().await.unwrap();

        assert_eq!(summary.reports[0].state(), TaskState::Failed);
        assert_eq!(std::fs::read(&existing).unwrap(), b"good data from last run");
        assert!(!dir.path().join("S5P_A.partial").exists());
    }

    #[tokio::test]
    async fn test_successful_fetch_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("S5P_A");
        std::fs::write(&existing, b"stale").unwrap();

        let it = item("S5P_A", 1);
        let fetcher = MockFetch::new().with(&it.download_link, MockResponse::ok(b"fresh", 2));
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader.download_all(vec![it], dir.path(), &hub.sink()).await;
        hub.await_all_settled().await.unwrap();

        assert!(summary.is_success());
        assert_eq!(std::fs::read(&existing).unwrap(), b"fresh");
        assert!(!dir.path().join("S5P_A.partial").exists());
    }

    #[tokio::test]
    async fn test_duplicate_titles_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = item("S5P_DUP", 1);
        let mut second = item("S5P_DUP", 2);
        second.download_link = "https://hub/odata/S5P_DUP_other/$value".to_string();
        let fetcher = MockFetch::new()
            .with(&first.download_link, MockResponse::ok(b"payload", 3))
            .with(&second.download_link, MockResponse::status(404));
        let downloader = Downloader::new(fetcher, None);
        let hub = ProgressHub::spawn(RecordingObserver::default());

        let summary = downloader
            .download_all(vec![first, second], dir.path(), &hub.sink())
            .await;
        let observer = hub.await_all_settled().await.unwrap();

        let states: Vec<TaskState> = summary.reports.iter().map(|r| r.state()).collect();
        assert_eq!(states, vec![TaskState::Done, TaskState::Failed]);
        assert_eq!(std::fs::read(dir.path().join("S5P_DUP")).unwrap(), b"payload");
        assert_eq!(observer.added_ids(), vec!["S5P_DUP", "S5P_DUP_2"]);
        assert!(observer
            .events_for("S5P_DUP")
            .iter()
            .any(|e| matches!(e, ProgressEvent::Done { .. })));
        assert!(observer
            .events_for("S5P_DUP_2")
            .iter()
            .any(|e| matches!(e, ProgressEvent::Failed { .. })));
    }

    #[test]
    fn test_sanitized_names_stay_unique() {
        let downloader = Downloader::new(MockFetch::new(), None);
        let tasks = downloader.create_download_tasks(
            vec![
                item("a/b", 1),
                item("a_b", 2),
                item("a_b", 3),
                item("x.partial", 4),
                item("x", 5),
            ],
            Path::new("/data"),
        );
        let ids: Vec<&str> = tasks.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["a_b", "a_b_2", "a_b_3", "x.partial", "x_5"]);
    }

    #[test]
    fn test_file_name_stays_in_directory() {
        assert_eq!(file_name("S5P_OFFL_L2__NO2"), "S5P_OFFL_L2__NO2");
        assert_eq!(file_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(file_name(".."), "unnamed");
    }
}
