// pizza-guard: synthetic feedback records and Bedrock guardrail tooling
//
// This is the library root. The three commands share the record schema in
// `records`; everything that talks to the cloud sits behind the traits in
// `guardrail::traits`.

pub mod batch;
pub mod config;
pub mod guardrail;
pub mod output;
pub mod records;
pub mod source;
