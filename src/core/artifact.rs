use crate::domain::ports::Storage;
use crate::utils::error::{DeployError, Result};
use alloy_json_abi::JsonAbi;
use alloy_primitives::{hex, Bytes};
use serde::Deserialize;

/// A compiled contract in the Hardhat artifact layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: String,
}

impl ContractArtifact {
    pub fn from_json(path: &str, data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|e| DeployError::ArtifactError {
            path: path.to_string(),
            reason: format!("not a contract artifact: {}", e),
        })
    }

    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Creation bytecode, rejecting abstract contracts and unlinked libraries.
    pub fn creation_code(&self) -> Result<Bytes> {
        let error = |reason: &str| DeployError::ArtifactError {
            path: self.fully_qualified_name(),
            reason: reason.to_string(),
        };

        let code = self.bytecode.trim();
        let stripped = code.strip_prefix("0x").unwrap_or(code);
        if stripped.is_empty() {
            return Err(error(
                "bytecode is empty; abstract contracts and interfaces cannot be deployed",
            ));
        }
        if stripped.contains("__$") {
            return Err(error("bytecode has unlinked library references"));
        }

        hex::decode(stripped)
            .map(Bytes::from)
            .map_err(|e| error(&format!("bytecode is not valid hex: {}", e)))
    }
}

/// Finds the artifact for `name` under `artifacts_dir`.
///
/// `name` is either a bare contract name (`Project`) or a fully qualified one
/// (`contracts/Project.sol:Project`).
pub async fn load_artifact<S: Storage>(
    storage: &S,
    artifacts_dir: &str,
    name: &str,
) -> Result<ContractArtifact> {
    let (source, contract) = match name.rsplit_once(':') {
        Some((source, contract)) => (Some(source), contract),
        None => (None, name),
    };

    let file_name = format!("{}.json", contract);
    let mut candidates: Vec<String> = storage
        .list_files(artifacts_dir)
        .await?
        .into_iter()
        .filter(|path| !path.ends_with(".dbg.json"))
        .filter(|path| path.rsplit('/').next() == Some(file_name.as_str()))
        .filter(|path| match source {
            Some(source) => path.starts_with(&format!("{}/", source)),
            None => true,
        })
        .collect();
    candidates.sort();

    tracing::debug!("Artifact candidates for {}: {:?}", name, candidates);

    match candidates.len() {
        0 => Err(DeployError::ArtifactNotFound {
            name: name.to_string(),
            dir: artifacts_dir.to_string(),
        }),
        1 => {
            let path = format!("{}/{}", artifacts_dir.trim_end_matches('/'), candidates[0]);
            let data = storage.read_file(&path).await?;
            let artifact = ContractArtifact::from_json(&path, &data)?;
            tracing::debug!("Loaded artifact {}", artifact.fully_qualified_name());
            Ok(artifact)
        }
        _ => Err(DeployError::AmbiguousArtifact {
            name: name.to_string(),
            candidates: candidates
                .iter()
                .map(|path| {
                    let source = path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(path);
                    format!("{}:{}", source, contract)
                })
                .collect(),
        }),
    }
}
