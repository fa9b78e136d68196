//! Display-only deployment variables.

use serde::Serialize;

use crate::config::{EnvSource, DISPLAY_ENV_VARS};

/// A named configuration variable and its value (empty when unset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// Read every display variable, in [`DISPLAY_ENV_VARS`] order.
pub fn environment_report(env: &dyn EnvSource) -> Vec<EnvVar> {
    DISPLAY_ENV_VARS
        .iter()
        .map(|name| EnvVar {
            name: name.to_string(),
            value: env.get_or_empty(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticEnv;

    #[test]
    fn test_report_order_and_values() {
        let env = StaticEnv::new().with("TAP_APP_NAME", "test-app");
        let vars = environment_report(&env);

        assert_eq!(vars.len(), 5);
        let names: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "TAP_DEPLOY_NUMBER",
                "TAP_DOCKER_TAG",
                "TAP_APP_URL",
                "TAP_APP_NAME",
                "TAP_TEAM_NAME",
            ]
        );
        assert_eq!(vars[3].value, "test-app");
    }

    #[test]
    fn test_unset_vars_are_empty() {
        let vars = environment_report(&StaticEnv::new());
        assert!(vars.iter().all(|v| v.value.is_empty()));
    }
}
