use schemars::schema_for;

use crate::pricing_config::PricingConfig;

pub fn generate_pricing_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(PricingConfig))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_sections() {
        let schema = generate_pricing_schema().unwrap();
        assert!(schema.contains("tiers"));
        assert!(schema.contains("surcharges"));
        assert!(schema.contains("velocity_band"));
    }
}
