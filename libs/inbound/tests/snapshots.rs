use std::fs;

use gsm_inbound::{InboundPayload, PayloadKind, PayloadNormalizer, SequentialMessageIds};
use serde_json::Value;

fn load_fixture(name: &str) -> Value {
    let path = format!("tests/fixtures/payloads/{name}.json");
    let data = fs::read_to_string(path).expect("fixture missing");
    serde_json::from_str(&data).expect("invalid json")
}

fn normalize_fixture(name: &str, kind: PayloadKind) -> gsm_inbound::InboundMessage {
    let normalizer = PayloadNormalizer::new(SequentialMessageIds::new("msg"));
    let payload = InboundPayload::from_json(kind, &load_fixture(name)).expect("decode");
    normalizer.normalize(payload).expect("normalize")
}

#[test]
fn text_message_snapshot() {
    let message = normalize_fixture("text", PayloadKind::Text);
    insta::assert_json_snapshot!("text_message", &message);
}

#[test]
fn question_message_snapshot() {
    let message = normalize_fixture("button_reply", PayloadKind::Interactive);
    insta::assert_json_snapshot!("question_message", &message);
}

#[test]
fn location_message_snapshot() {
    let message = normalize_fixture("location", PayloadKind::Location);
    insta::assert_json_snapshot!("location_message", &message);
}

#[test]
fn image_message_snapshot() {
    let message = normalize_fixture("image", PayloadKind::Image);
    insta::assert_json_snapshot!("image_message", &message);
}
