//! BDD step definitions for response validation and status formatting

use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use serde_json::json;

use homework_bot::homework::{format_status, validate};
use homework_bot::HomeworkBotError;

use super::{docstring, json_docstring};
use crate::world::HomeworkBotWorld;

#[given("the API payload:")]
fn api_payload(world: &mut HomeworkBotWorld, step: &Step) {
    world.payload = Some(json_docstring(step));
}

#[given(expr = "a homework record named {string} with status {string}")]
fn homework_record(world: &mut HomeworkBotWorld, name: String, status: String) {
    world.payload = Some(json!({"homework_name": name, "status": status}));
}

#[given("the homework record:")]
fn homework_record_json(world: &mut HomeworkBotWorld, step: &Step) {
    world.payload = Some(json_docstring(step));
}

#[when("the payload is validated")]
fn payload_is_validated(world: &mut HomeworkBotWorld) {
    let payload = world.payload.as_ref().expect("payload not set");
    world.validation_result = Some(validate(payload).map(|records| records.len()));
}

#[when("the record is formatted")]
fn record_is_formatted(world: &mut HomeworkBotWorld) {
    let record = world.payload.as_ref().expect("record not set");
    world.format_result = Some(format_status(record));
}

#[then(expr = "validation should return {int} records")]
fn validation_returns(world: &mut HomeworkBotWorld, count: usize) {
    let result = world.validation_result.as_ref().expect("no result");
    assert_eq!(*result.as_ref().unwrap(), count);
}

#[then("validation should fail with a shape error")]
fn validation_fails_with_shape(world: &mut HomeworkBotWorld) {
    let result = world.validation_result.as_ref().expect("no result");
    assert!(
        matches!(result, Err(HomeworkBotError::Shape(_))),
        "expected Shape error, got {result:?}"
    );
}

#[then("the message should be:")]
fn message_should_be(world: &mut HomeworkBotWorld, step: &Step) {
    let result = world.format_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().unwrap(), docstring(step));
}

#[then(expr = "the message should end with {string}")]
fn message_ends_with(world: &mut HomeworkBotWorld, verdict: String) {
    let result = world.format_result.as_ref().expect("no result");
    let message = result.as_ref().unwrap();
    assert!(message.ends_with(&verdict), "{message}");
}

#[then("formatting should fail with an unknown status error")]
fn formatting_fails_unknown(world: &mut HomeworkBotWorld) {
    let result = world.format_result.as_ref().expect("no result");
    assert!(
        matches!(result, Err(HomeworkBotError::UnknownStatus(_))),
        "expected UnknownStatus error, got {result:?}"
    );
}

#[then("formatting should fail with a shape error")]
fn formatting_fails_shape(world: &mut HomeworkBotWorld) {
    let result = world.format_result.as_ref().expect("no result");
    assert!(
        matches!(result, Err(HomeworkBotError::Shape(_))),
        "expected Shape error, got {result:?}"
    );
}
