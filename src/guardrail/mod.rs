// Guardrails — provisioning a moderation policy and running records through it.
//
// The traits in `traits.rs` are the swap point. `BedrockAdmin` and
// `BedrockRuntime` are the real implementations; tests use mocks.

pub mod bedrock;
pub mod error;
pub mod invoke;
pub mod invoker;
pub mod policy;
pub mod traits;
