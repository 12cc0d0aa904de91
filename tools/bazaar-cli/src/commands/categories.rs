//! Category listing.

use anyhow::{bail, Result};
use bazaar_catalog::catalog::CategoryRule;

use super::CategoriesArgs;
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let rules: Vec<&CategoryRule> = match &args.name {
        Some(name) => match CategoryRule::find(name) {
            Some(rule) => vec![rule],
            None => bail!("Unknown category: {}", name),
        },
        None => CategoryRule::all().iter().collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&rules);
        return Ok(());
    }

    ctx.output.header("Categories");
    let widths = [28, 16, 12, 10];
    ctx.output
        .table_row(&["CATEGORY", "WEIGHT", "QUANTITY", "EXAMPLE"], &widths);
    for rule in rules {
        let weight = format!("{}-{} {}", rule.weight_min, rule.weight_max, rule.weight_unit);
        let quantity = format!(
            "{}-{} {}",
            rule.quantity_min, rule.quantity_max, rule.quantity_unit
        );
        let example = format!("{}/{}", rule.weight_placeholder, rule.quantity_placeholder);
        ctx.output
            .table_row(&[rule.category, &weight, &quantity, &example], &widths);
    }
    Ok(())
}
