use clap::Args;
use serde::Serialize;

use namecheck::naming::{NamingPolicy, RULE_ID, STATIC_MARKER};

use super::CmdResult;

#[derive(Args)]
pub struct PolicyArgs {}

#[derive(Serialize)]
#[serde(tag = "command", rename = "policy")]
#[serde(rename_all = "camelCase")]
pub struct PolicyOutput {
    pub rule_id: &'static str,
    pub static_marker: &'static str,
    pub public_field_prefixes: Vec<PrefixEntry>,
    pub private_field_prefixes: Vec<PrefixEntry>,
    pub method_prefixes: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct PrefixEntry {
    #[serde(rename = "type")]
    pub type_name: &'static str,
    pub prefix: &'static str,
}

fn entries(table: &[(&'static str, &'static str)]) -> Vec<PrefixEntry> {
    table
        .iter()
        .map(|&(type_name, prefix)| PrefixEntry { type_name, prefix })
        .collect()
}

pub fn run_json(_args: PolicyArgs) -> CmdResult<PolicyOutput> {
    let policy = NamingPolicy::standard();

    Ok((
        PolicyOutput {
            rule_id: RULE_ID,
            static_marker: STATIC_MARKER,
            public_field_prefixes: entries(policy.prefixes.public_prefixes()),
            private_field_prefixes: entries(policy.prefixes.private_prefixes()),
            method_prefixes: policy.method_prefixes.iter().collect(),
        },
        0,
    ))
}
