use serde_json::Value;

use nest_calc_core::RateTable;

/// Show the rate table calculations will use.
pub fn run_rates(rates: &RateTable) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(rates)?)
}

/// Load the rate table from `path`, or fall back to the built-in one.
pub fn load_rates(path: Option<&str>) -> Result<RateTable, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            log::debug!("loading rate table from {path}");
            let table: RateTable = crate::input::file::read_structured(path)?;
            log::info!(
                "using custom rate table: {} periods, {} intervals",
                table.periods().len(),
                table.intervals().len()
            );
            Ok(table)
        }
        None => Ok(RateTable::standard().clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_listing() {
        let rates = load_rates(None).unwrap();
        let value = run_rates(&rates).unwrap();
        assert_eq!(value["periods"].as_array().unwrap().len(), 4);
        assert_eq!(value["intervals"][4]["name"], "Monthly");
        assert_eq!(value["intervals"][4]["days"], "30");
    }
}
