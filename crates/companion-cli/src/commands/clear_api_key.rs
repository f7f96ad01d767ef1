use anyhow::{Context, Result, bail};
use companion_core::BlobStore;
use companion_infrastructure::crypto::{decrypt, derive_key, encrypt};
use serde_json::Value;

use super::context::{GlobalArgs, ResolvedSettings};

/// Blanks the stored API key and re-seals the save in place.
///
/// Works on the decrypted JSON tree, so every other field is written back
/// exactly as read, including values the typed model would normalize.
pub fn run(args: &GlobalArgs) -> Result<()> {
    let resolved = ResolvedSettings::resolve(args)?;
    let store = resolved.store()?;

    let Some(blob) = store.read_blob()? else {
        bail!("No save file at {}", store.path().display());
    };
    let secret = resolved
        .identity()
        .try_get_stable_secret()
        .context("No identity secret available; try --identity debug or --secret")?;
    let key = derive_key(&secret);

    let text = decrypt(&blob, &key)?;
    let mut snapshot: Value =
        serde_json::from_str(&text).context("Save file decrypted but is not valid JSON")?;

    if !clear_api_key(&mut snapshot) {
        println!("No API key stored in {}", store.path().display());
        return Ok(());
    }

    store.write_blob(&encrypt(&serde_json::to_string_pretty(&snapshot)?, &key)?)?;
    tracing::info!("[CLI] Cleared API key in {}", store.path().display());
    println!("API key cleared in {}", store.path().display());
    Ok(())
}

/// Sets `userData.apiKey` to `""`. Returns whether anything changed.
fn clear_api_key(snapshot: &mut Value) -> bool {
    let Some(key) = snapshot
        .get_mut("userData")
        .and_then(|user| user.get_mut("apiKey"))
    else {
        return false;
    };
    if key.as_str() == Some("") {
        return false;
    }
    *key = Value::String(String::new());
    true
}
