//! Endpoint registry mapping logical mailing operations to candidate paths.
//!
//! The vendor API is not consistent about path spelling across deployments,
//! so every operation lists one or more literal spellings tried in order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Logical operation exposed by the mailing client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// List the campaigns of the company
    ListCampaigns,
    /// Create an empty mailing container inside a campaign
    CreateContainer,
    /// Upload contacts as JSON objects
    SendJson,
    /// Upload contacts as columnar rows
    SendArray,
    /// Upload contacts from a CSV file
    SendCsv,
    /// Change the dialing weight of a mailing
    AdjustWeight,
}

impl Operation {
    /// Every operation, in declaration order
    pub const ALL: [Operation; 6] = [
        Operation::ListCampaigns,
        Operation::CreateContainer,
        Operation::SendJson,
        Operation::SendArray,
        Operation::SendCsv,
        Operation::AdjustWeight,
    ];

    /// Stable key of the operation, used in logs and errors
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListCampaigns => "list_campaigns",
            Operation::CreateContainer => "create_container",
            Operation::SendJson => "send_json",
            Operation::SendArray => "send_array",
            Operation::SendCsv => "send_csv",
            Operation::AdjustWeight => "adjust_weight",
        }
    }

    /// Built-in candidate paths for this operation
    #[must_use]
    pub fn default_paths(&self) -> &'static [&'static str] {
        match self {
            Operation::ListCampaigns => &["campaign lists", "campaign/lists"],
            Operation::CreateContainer => &["create malling list", "create mailing list"],
            Operation::SendJson => &["create mailing json"],
            Operation::SendArray => &["create mailing by array"],
            Operation::SendCsv => &["malling list csv", "mailing/list/csv"],
            Operation::AdjustWeight => &["Update weight"],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalises a literal path spelling into a URL path segment.
///
/// Leading slashes are removed and spaces become `/`, so `"campaign lists"`
/// and `"/campaign/lists"` both resolve to `campaign/lists`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    path.trim().trim_start_matches('/').replace(' ', "/")
}

/// Ordered candidate paths per operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    entries: HashMap<Operation, Vec<String>>,
}

impl EndpointRegistry {
    /// Registry holding the built-in paths
    #[must_use]
    pub fn new() -> Self {
        let entries = Operation::ALL
            .iter()
            .map(|op| {
                let paths = op.default_paths().iter().map(|p| (*p).to_string()).collect();
                (*op, paths)
            })
            .collect();
        Self { entries }
    }

    /// Replaces the candidates of `operation`
    pub fn set<I, S>(&mut self, operation: Operation, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(operation, paths.into_iter().map(Into::into).collect());
        self
    }

    /// Appends candidates to `operation`, after the existing ones
    pub fn extend<I, S>(&mut self, operation: Operation, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(operation)
            .or_default()
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Merges caller overrides over the current entries, operation by operation
    #[must_use]
    pub fn with_overrides(mut self, overrides: HashMap<Operation, Vec<String>>) -> Self {
        for (operation, paths) in overrides {
            self.set(operation, paths);
        }
        self
    }

    /// Raw configured spellings for `operation`
    #[must_use]
    pub fn paths(&self, operation: Operation) -> &[String] {
        self.entries
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Normalised, de-duplicated candidate paths in try order
    #[must_use]
    pub fn candidates(&self, operation: Operation) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for path in self.paths(operation) {
            let path = normalize_path(path);
            if !path.is_empty() && !out.contains(&path) {
                out.push(path);
            }
        }
        out
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}
