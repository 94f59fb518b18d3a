//! Fan-out pipeline example: one root per folder, one child per file, one
//! grandchild per output artifact.
//!
//! ```bash
//! cargo run --example pipeline
//! ```
//!
//! The payloads here are synthetic stand-ins for the real collaborators
//! (file discovery, CSV parsing, chart rendering): the tree neither knows
//! nor cares what flows through it. What the example shows is the wiring:
//! handlers spawn children and forward work down, completion propagates
//! back up, and the driver learns the whole pipeline is done by awaiting
//! the root's completion handle.

use waggle::prelude::*;

// ============================================================================
// Payloads
// ============================================================================

/// A discovered input file: name plus its parsed rows.
#[derive(Clone)]
struct SensorFile {
    name: &'static str,
    rows: Vec<(u32, f64)>,
}

/// One output artifact to produce from a file.
#[derive(Clone)]
struct Artifact {
    file: &'static str,
    kind: &'static str,
    rows: Vec<(u32, f64)>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Root: receives the folder listing and fans out one child per file.
struct Folder;

#[async_trait]
impl PayloadHandler for Folder {
    type Payload = Vec<SensorFile>;

    async fn on_payload(
        &mut self,
        files: Vec<SensorFile>,
        node: &mut ActorNode<Vec<SensorFile>>,
    ) -> Result<()> {
        println!("folder: {} files discovered", files.len());
        for file in files {
            node.create_child(File).send_payload(file).await?;
        }
        // No explicit finish: the root completes when its last child does.
        Ok(())
    }
}

/// One per file: fans out one child per artifact, or finishes immediately
/// when the file turned out empty.
struct File;

#[async_trait]
impl PayloadHandler for File {
    type Payload = SensorFile;

    async fn on_payload(
        &mut self,
        file: SensorFile,
        node: &mut ActorNode<SensorFile>,
    ) -> Result<()> {
        if file.rows.is_empty() {
            println!("file {}: nothing to plot", file.name);
            return node.finish().await;
        }
        for kind in ["chart", "summary"] {
            node.create_child(Renderer)
                .send_payload(Artifact {
                    file: file.name,
                    kind,
                    rows: file.rows.clone(),
                })
                .await?;
        }
        Ok(())
    }
}

/// One per artifact: "renders" and finishes.
struct Renderer;

#[async_trait]
impl PayloadHandler for Renderer {
    type Payload = Artifact;

    async fn on_payload(&mut self, job: Artifact, node: &mut ActorNode<Artifact>) -> Result<()> {
        println!(
            "  rendered {}/{} from {} rows",
            job.file,
            job.kind,
            job.rows.len()
        );
        node.finish().await
    }
}

// ============================================================================
// Driver
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let files = vec![
        SensorFile {
            name: "0412_hive.csv",
            rows: vec![(8, 21.5), (9, 22.0), (10, 22.8)],
        },
        SensorFile {
            name: "0413_hive.csv",
            rows: vec![(8, 20.9), (9, 21.3)],
        },
        SensorFile {
            name: "0414_hive.csv",
            rows: vec![],
        },
    ];

    let system = ActorSystem::new();
    let (root, completion) = system.spawn_root(Folder);

    root.send_payload(files).await?;
    completion.wait().await?;

    println!("pipeline complete");
    Ok(())
}
