use super::environment::ProfileEnvironment;
use super::metadata::metadata_resource;
use crate::provision::Resource;

pub const STACK_DIR: &str = "stack";

const CONFIG_EXAMPLE_TEMPLATE: &str = include_str!("assets/base/config.yml.example");
const STACK_ENV_TEMPLATE: &str = include_str!("assets/base/stack/stack.env");
const STACK_README_TEMPLATE: &str = include_str!("assets/base/stack/README.md");

/// Everything a freshly created profile starts with.
pub fn base_profile_resources(env: &dyn ProfileEnvironment) -> Vec<Resource<'_>> {
    vec![
        metadata_resource(env),
        Resource::template("config.yml.example", CONFIG_EXAMPLE_TEMPLATE),
        Resource::directory(STACK_DIR),
        Resource::template("stack/stack.env", STACK_ENV_TEMPLATE),
        Resource::template("stack/README.md", STACK_README_TEMPLATE),
    ]
}
