use anyhow::{Context, Result, bail};
use companion_core::BlobStore;
use companion_infrastructure::crypto::{decrypt, derive_key};
use serde_json::Value;

use super::context::{GlobalArgs, ResolvedSettings};

const REDACTED: &str = "<redacted>";

pub fn run(args: &GlobalArgs, show_secrets: bool) -> Result<()> {
    let resolved = ResolvedSettings::resolve(args)?;
    let store = resolved.store()?;

    let Some(blob) = store.read_blob()? else {
        bail!("No save file at {}", store.path().display());
    };
    let secret = resolved
        .identity()
        .try_get_stable_secret()
        .context("No identity secret available; try --identity debug or --secret")?;

    let text = decrypt(&blob, &derive_key(&secret))?;
    let mut snapshot: Value =
        serde_json::from_str(&text).context("Save file decrypted but is not valid JSON")?;

    if !show_secrets {
        redact_api_key(&mut snapshot);
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Replaces a non-empty `userData.apiKey` with a placeholder.
fn redact_api_key(snapshot: &mut Value) {
    if let Some(Value::String(key)) = snapshot
        .get_mut("userData")
        .and_then(|user| user.get_mut("apiKey"))
    {
        if !key.is_empty() {
            *key = REDACTED.to_string();
        }
    }
}
