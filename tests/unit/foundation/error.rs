use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TwibbonError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TwibbonError::decode(Layer::Photo, "x")
            .to_string()
            .contains("decode error (photo):")
    );
    assert!(
        TwibbonError::export_unavailable("x")
            .to_string()
            .contains("export unavailable:")
    );
    assert!(
        TwibbonError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TwibbonError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn duplicate_keeps_variant_and_message() {
    let err = TwibbonError::decode(Layer::Frame, "truncated");
    match err.duplicate() {
        TwibbonError::Decode { layer, message } => {
            assert_eq!(layer, Layer::Frame);
            assert_eq!(message, "truncated");
        }
        other => panic!("unexpected variant: {other:?}"),
    }

    let other = TwibbonError::Other(anyhow::anyhow!("io failed"));
    assert!(other.duplicate().to_string().contains("io failed"));
}
