//! Benchmark harnesses for the stackdiff engine.
//!
//! The crate exposes deterministic synthetic snapshot pairs so Criterion
//! benchmarks can exercise diff construction and rendering without fixture
//! files. Snapshots look like small fleets of infrastructure resources
//! with a fraction of them modified between the before and after sides.
//!
//! # Examples
//!
//! ```
//! let corpora = stackdiff_benches::available_corpora();
//! assert!(!corpora.is_empty());
//! let dataset = corpora[0].load();
//! assert!(dataset.diff().has_changes());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use serde_json::json;
use stackdiff_core::{Diff, Value};

/// A named corpus size used to parameterize benchmark groups.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    resources: usize,
}

impl Corpus {
    /// Returns the corpus name used in benchmark IDs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of resources in each generated snapshot.
    #[must_use]
    pub fn resources(&self) -> usize {
        self.resources
    }

    /// Generates the before/after snapshot pair for this corpus.
    #[must_use]
    pub fn load(&self) -> Dataset {
        Dataset { before: snapshot(self.resources, false), after: snapshot(self.resources, true) }
    }
}

/// Snapshot pair ready to diff.
#[derive(Clone, Debug)]
pub struct Dataset {
    before: Value,
    after: Value,
}

impl Dataset {
    /// Returns the before snapshot.
    #[must_use]
    pub fn before(&self) -> &Value {
        &self.before
    }

    /// Returns the after snapshot.
    #[must_use]
    pub fn after(&self) -> &Value {
        &self.after
    }

    /// Builds the structural diff between the two snapshots.
    #[must_use]
    pub fn diff(&self) -> Diff {
        self.before.diff(&self.after)
    }
}

/// Lists the corpora available to benchmark groups.
#[must_use]
pub fn available_corpora() -> Vec<Corpus> {
    vec![
        Corpus { name: "small", resources: 8 },
        Corpus { name: "medium", resources: 64 },
        Corpus { name: "large", resources: 256 },
    ]
}

fn snapshot(resources: usize, mutated: bool) -> Value {
    let mut root = serde_json::Map::new();
    for index in 0..resources {
        let touched = mutated && index % 4 == 0;
        let bucket = if touched {
            format!("bucket-{index}-v2")
        } else {
            format!("bucket-{index}")
        };
        let mut tags = vec![
            json!({"Key": "env", "Value": if touched { "prod" } else { "dev" }}),
            json!({"Key": "owner", "Value": "platform"}),
            json!({"Key": "index", "Value": index.to_string()}),
        ];
        if touched {
            tags.push(json!({"Key": "migrated", "Value": "true"}));
        }
        root.insert(
            format!("Resource{index}"),
            json!({
                "Type": "AWS::S3::Bucket",
                "Properties": {
                    "BucketName": bucket,
                    "Tags": tags,
                    "VersioningConfiguration": {
                        "Status": if touched { "Enabled" } else { "Suspended" },
                    },
                },
            }),
        );
    }
    Value::from_json_value(serde_json::Value::Object(root)).expect("synthetic snapshot is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpora_generate_differing_snapshots() {
        for corpus in available_corpora() {
            let dataset = corpus.load();
            assert!(dataset.diff().has_changes(), "corpus {}", corpus.name());
            assert_ne!(dataset.before(), dataset.after(), "corpus {}", corpus.name());
        }
    }
}
