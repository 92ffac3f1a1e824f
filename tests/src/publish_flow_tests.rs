//! End-to-end publish flow over fake hub and key registry clients.
//!
//! Covers the four request shapes:
//! - existing signer key: one hub call, no chain calls
//! - custody mnemonic: simulate, broadcast, receipt, grace period, hub call
//! - no signing material: rejected before any network call
//! - malformed cast: rejected before the hub call

use anyhow::Result;
use cast_relayer::{Error, SigningMaterial};
use farcaster_types::proto::embed;
use farcaster_types::{verify_message, CastAddBody, Embed, FarcasterNetwork};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::utils::{build_state, test_config, FakeHub, FakeRegistry, RAW_KEY_HEX, TEST_MNEMONIC};

fn cast(text: &str) -> CastAddBody {
    CastAddBody {
        text: text.to_string(),
        ..Default::default()
    }
}

// ── Existing signer ─────────────────────────────────────────────────

#[tokio::test]
async fn test_existing_key_publishes_without_chain_calls() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::default());
    let state = build_state(test_config(), hub.clone(), registry.clone());

    let outcome = state
        .publisher
        .publish_cast(cast("gm"), 6833, &SigningMaterial::private_key(RAW_KEY_HEX))
        .await?;

    assert_eq!(registry.network_calls(), 0);
    assert!(outcome.signer_private_key.is_none());

    let submitted = hub.submissions();
    assert_eq!(submitted.len(), 1);
    let message = &submitted[0];
    verify_message(message)?;
    let data = message.data.as_ref().expect("message data");
    assert_eq!(data.fid, 6833);
    assert_eq!(data.network, FarcasterNetwork::Mainnet as i32);
    assert_eq!(message.hash, outcome.message_hash);
    Ok(())
}

#[tokio::test]
async fn test_existing_key_signs_with_same_public_key_every_time() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let state = build_state(test_config(), hub.clone(), Arc::new(FakeRegistry::default()));
    let material = SigningMaterial::private_key(RAW_KEY_HEX);

    let first = state.publisher.publish_cast(cast("one"), 1, &material).await?;
    let second = state.publisher.publish_cast(cast("two"), 1, &material).await?;

    assert_eq!(first.signer_public_key, second.signer_public_key);
    assert_ne!(first.message_hash, second.message_hash);
    assert_eq!(hub.submissions().len(), 2);
    Ok(())
}

// ── Mnemonic provisioning ──────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_mnemonic_registers_signer_then_publishes() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::default());
    let state = build_state(test_config(), hub.clone(), registry.clone());

    let start = tokio::time::Instant::now();
    let outcome = state
        .publisher
        .publish_cast(cast("first cast"), 977, &SigningMaterial::mnemonic(TEST_MNEMONIC))
        .await?;

    assert_eq!(registry.simulations.load(Ordering::SeqCst), 1);
    assert_eq!(registry.broadcasts.load(Ordering::SeqCst), 1);
    assert_eq!(registry.receipts.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() >= Duration::from_secs(30));
    assert_eq!(hub.submissions().len(), 1);

    let added = registry.added.lock().unwrap();
    assert_eq!(added[0].key, outcome.signer_public_key);
    assert!(outcome.signer_private_key.is_some());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_mnemonic_generates_new_key_per_request() -> Result<()> {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::default());
    let state = build_state(test_config(), hub.clone(), registry.clone());
    let material = SigningMaterial::mnemonic(TEST_MNEMONIC);

    let a = state.publisher.publish_cast(cast("a"), 977, &material).await?;
    let b = state.publisher.publish_cast(cast("b"), 977, &material).await?;

    assert_ne!(a.signer_private_key, b.signer_private_key);
    assert_ne!(a.signer_public_key, b.signer_public_key);
    assert_eq!(registry.network_calls(), 6);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reverted_registration_aborts_before_hub() {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::reverting());
    let state = build_state(test_config(), hub.clone(), registry.clone());

    let result = state
        .publisher
        .publish_cast(cast("gm"), 977, &SigningMaterial::mnemonic(TEST_MNEMONIC))
        .await;

    assert!(matches!(result, Err(Error::Chain(_))));
    assert!(hub.submissions().is_empty());
}

#[tokio::test]
async fn test_invalid_mnemonic_makes_no_chain_calls() {
    let registry = Arc::new(FakeRegistry::default());
    let state = build_state(test_config(), Arc::new(FakeHub::default()), registry.clone());

    let result = state
        .publisher
        .publish_cast(cast("gm"), 977, &SigningMaterial::mnemonic("definitely not bip39"))
        .await;

    assert!(matches!(result, Err(Error::InvalidRequest(_))));
    assert_eq!(registry.network_calls(), 0);
}

// ── Missing material ───────────────────────────────────────────────

#[tokio::test]
async fn test_no_signing_material_makes_no_network_calls() {
    let hub = Arc::new(FakeHub::default());
    let registry = Arc::new(FakeRegistry::default());
    let state = build_state(test_config(), hub.clone(), registry.clone());

    let err = state
        .publisher
        .publish_cast(cast("gm"), 1, &SigningMaterial::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(err.to_string(), "Either signerPrivateKey or mnemonic must be provided");
    assert!(hub.submissions().is_empty());
    assert_eq!(registry.network_calls(), 0);
}

// ── Construction and submission failures ───────────────────────────

#[tokio::test]
async fn test_empty_embed_fails_construction_before_hub() {
    let hub = Arc::new(FakeHub::default());
    let state = build_state(test_config(), hub.clone(), Arc::new(FakeRegistry::default()));
    let body = CastAddBody {
        text: "look".into(),
        embeds: vec![Embed { embed: None }],
        ..Default::default()
    };

    let err = state
        .publisher
        .publish_cast(body, 1, &SigningMaterial::private_key(RAW_KEY_HEX))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MessageConstruction(_)));
    assert!(err.to_string().starts_with("Error creating message:"));
    assert!(hub.submissions().is_empty());
}

#[tokio::test]
async fn test_too_many_embeds_fails_construction() {
    let hub = Arc::new(FakeHub::default());
    let state = build_state(test_config(), hub.clone(), Arc::new(FakeRegistry::default()));
    let url = |u: &str| Embed {
        embed: Some(embed::Embed::Url(u.to_string())),
    };
    let body = CastAddBody {
        embeds: vec![url("https://a"), url("https://b"), url("https://c")],
        ..Default::default()
    };

    let result = state
        .publisher
        .publish_cast(body, 1, &SigningMaterial::private_key(RAW_KEY_HEX))
        .await;

    assert!(matches!(result, Err(Error::MessageConstruction(_))));
    assert!(hub.submissions().is_empty());
}

#[tokio::test]
async fn test_hub_rejection_is_reported() {
    let hub = Arc::new(FakeHub::rejecting("InvalidArgument: unknown signer"));
    let state = build_state(test_config(), hub.clone(), Arc::new(FakeRegistry::default()));

    let err = state
        .publisher
        .publish_cast(cast("gm"), 1, &SigningMaterial::private_key(RAW_KEY_HEX))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Submission(_)));
    assert_eq!(
        err.to_string(),
        "Error submitting message to hub: InvalidArgument: unknown signer"
    );
    assert_eq!(hub.submissions().len(), 1);
}
