//! End-to-end fan-out over an actor tree, in the shape the surrounding
//! analysis pipeline uses: one root per input folder, one child per
//! discovered file, one grandchild per output artifact.
//!
//! # What's Tested
//!
//! - The whole tree completes once every artifact leaf has finished,
//!   observed through the root completion handle
//! - A file with no usable rows takes the terminal-payload path and still
//!   completes
//! - Every non-root actor has exactly one parent, every actor id is unique
//! - All artifacts are produced exactly once

use std::sync::Mutex;

use tokio::time::timeout;
use waggle::prelude::*;

const WAIT: Duration = Duration::from_secs(5);

const ARTIFACT_KINDS: [&str; 2] = ["chart", "summary"];

#[derive(Clone)]
struct SensorFile {
    name: String,
    rows: Vec<u32>,
}

#[derive(Clone)]
struct ArtifactJob {
    file: String,
    kind: &'static str,
    rows: Vec<u32>,
}

/// Shared observations: (actor id, parent id) pairs recorded at dispatch
/// time, and the artifacts produced.
#[derive(Default)]
struct PipelineLog {
    parentage: Mutex<Vec<(ActorId, Option<ActorId>)>>,
    artifacts: Mutex<Vec<String>>,
}

impl PipelineLog {
    fn record_parentage<T: Send + 'static>(&self, node: &ActorNode<T>) {
        self.parentage
            .lock()
            .unwrap()
            .push((node.id(), node.parent_id()));
    }
}

/// Root: fans out one child per file in the folder listing.
struct FolderActor {
    log: Arc<PipelineLog>,
}

#[async_trait]
impl PayloadHandler for FolderActor {
    type Payload = Vec<SensorFile>;

    async fn on_payload(
        &mut self,
        files: Vec<SensorFile>,
        node: &mut ActorNode<Vec<SensorFile>>,
    ) -> Result<()> {
        self.log.record_parentage(node);
        for file in files {
            let child = node.create_child(FileActor {
                log: Arc::clone(&self.log),
            });
            child.send_payload(file).await?;
        }
        Ok(())
    }
}

/// One per file: fans out one child per artifact kind, or finishes
/// immediately on a terminal (empty) payload.
struct FileActor {
    log: Arc<PipelineLog>,
}

#[async_trait]
impl PayloadHandler for FileActor {
    type Payload = SensorFile;

    async fn on_payload(&mut self, file: SensorFile, node: &mut ActorNode<SensorFile>) -> Result<()> {
        self.log.record_parentage(node);
        if file.rows.is_empty() {
            return node.finish().await;
        }
        for kind in ARTIFACT_KINDS {
            let child = node.create_child(ArtifactActor {
                log: Arc::clone(&self.log),
            });
            child
                .send_payload(ArtifactJob {
                    file: file.name.clone(),
                    kind,
                    rows: file.rows.clone(),
                })
                .await?;
        }
        Ok(())
    }
}

/// One per output artifact: renders and finishes.
struct ArtifactActor {
    log: Arc<PipelineLog>,
}

#[async_trait]
impl PayloadHandler for ArtifactActor {
    type Payload = ArtifactJob;

    async fn on_payload(
        &mut self,
        job: ArtifactJob,
        node: &mut ActorNode<ArtifactJob>,
    ) -> Result<()> {
        self.log.record_parentage(node);
        self.log
            .artifacts
            .lock()
            .unwrap()
            .push(format!("{}/{} ({} rows)", job.file, job.kind, job.rows.len()));
        node.finish().await
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn folder_tree_produces_every_artifact_and_completes() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .try_init();

    let files = vec![
        SensorFile {
            name: "0412_hive.csv".to_string(),
            rows: vec![1, 2, 3],
        },
        SensorFile {
            name: "0413_hive.csv".to_string(),
            rows: vec![4, 5],
        },
        SensorFile {
            name: "0414_hive.csv".to_string(),
            rows: vec![],
        },
    ];

    let log = Arc::new(PipelineLog::default());
    let system = ActorSystem::new();
    let (root, completion) = system.spawn_root(FolderActor {
        log: Arc::clone(&log),
    });

    root.send_payload(files).await.unwrap();
    timeout(WAIT, completion.wait()).await.unwrap().unwrap();

    // Two files carry rows, each yielding one artifact per kind.
    let mut artifacts = log.artifacts.lock().unwrap().clone();
    artifacts.sort();
    assert_eq!(
        artifacts,
        vec![
            "0412_hive.csv/chart (3 rows)",
            "0412_hive.csv/summary (3 rows)",
            "0413_hive.csv/chart (2 rows)",
            "0413_hive.csv/summary (2 rows)",
        ]
    );

    // Tree shape: 1 root + 3 files + 4 artifacts, unique ids, exactly one
    // parentless actor, every other actor with exactly one parent.
    let parentage = log.parentage.lock().unwrap().clone();
    assert_eq!(parentage.len(), 8);

    let mut ids: Vec<ActorId> = parentage.iter().map(|(id, _)| *id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8, "every actor id must be unique");

    let roots = parentage
        .iter()
        .filter(|(_, parent)| parent.is_none())
        .count();
    assert_eq!(roots, 1, "only the root may be parentless");
    assert_eq!(parentage.iter().filter(|(_, p)| p.is_some()).count(), 7);
}
