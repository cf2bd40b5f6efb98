//! Output formatting module

use serde::Serialize;
use treeshop_app::app::RateRecalibration;
use treeshop_app::constants::afiss_catalog::AfissCatalogEntry;
use treeshop_domain::model::{
    BillingRateOutputs, ClearingPricingResult, ClearingScoreResult, CompletionReport,
    EquipmentCostOutputs, LoadoutCostOutputs, ProjectPricingOutputs, TreeTrimmingResult,
};
use treeshop_types::{OutputFormat, Result, ServiceType};

/// A job score with the production time it implies
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub service: ServiceType,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afiss_multiplier: Option<f64>,
    pub production_rate: f64,
    pub production_hours: f64,
}

impl ScoreSummary {
    pub fn new(service: ServiceType, score: f64, afiss_multiplier: Option<f64>, production_rate: f64) -> Self {
        Self {
            service,
            score,
            afiss_multiplier,
            production_rate,
            production_hours: score / production_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RateRow {
    pub service: ServiceType,
    pub rate: f64,
    pub builtin: f64,
    pub overridden: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_billing_table(rates: &BillingRateOutputs) {
    for (tier, rate) in rates.tiers() {
        println!("  {:<8} ${:>10.2}/hr", tier.label(), rate);
    }
}

pub fn output_equipment(format: OutputFormat, result: &EquipmentCostOutputs) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }
    println!("\nEquipment Cost");
    println!("==============");
    println!("Ownership:       ${:.2}/hr", result.ownership_cost_per_hour);
    println!("Operating:       ${:.2}/hr", result.operating_cost_per_hour);
    println!("Total:           ${:.2}/hr", result.total_cost_per_hour);
    Ok(())
}

pub fn output_employee(format: OutputFormat, base_rate: f64, burden: f64, true_cost: f64) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "base_hourly_rate": base_rate,
            "burden_multiplier": burden,
            "true_cost_per_hour": true_cost,
        }));
    }
    println!("\nEmployee Cost");
    println!("=============");
    println!("Base rate:       ${:.2}/hr", base_rate);
    println!("Burden:          x{:.2}", burden);
    println!("True cost:       ${:.2}/hr", true_cost);
    Ok(())
}

pub fn output_loadout(format: OutputFormat, result: &LoadoutCostOutputs, billing: &BillingRateOutputs) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "cost": result,
            "billing_rates": billing,
        }));
    }
    println!("\nLoadout Cost");
    println!("============");
    println!("Equipment:       ${:.2}/hr", result.equipment_cost);
    println!("Labor:           ${:.2}/hr", result.labor_cost);
    println!("Overhead:        ${:.2}/hr", result.overhead_cost);
    println!("Total:           ${:.2}/hr", result.total_cost);
    println!("\nBilling rates:");
    print_billing_table(billing);
    Ok(())
}

pub fn output_billing(format: OutputFormat, cost: f64, billing: &BillingRateOutputs) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(billing);
    }
    println!("\nBilling Rates for ${:.2}/hr", cost);
    println!("============================");
    print_billing_table(billing);
    Ok(())
}

pub fn output_score(format: OutputFormat, summary: &ScoreSummary) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(summary);
    }
    println!("\n{} Score", summary.service);
    println!("===================");
    println!("Score:           {:.1} pts", summary.score);
    if let Some(afiss) = summary.afiss_multiplier {
        println!("AFISS:           x{:.2}", afiss);
    }
    println!("Production rate: {:.4} pts/hr", summary.production_rate);
    println!("Production time: {:.1} hr", summary.production_hours);
    Ok(())
}

pub fn output_trimming(format: OutputFormat, result: &TreeTrimmingResult, summary: &ScoreSummary) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "trimming": result,
            "production_rate": summary.production_rate,
            "production_hours": summary.production_hours,
        }));
    }
    println!("\nTree Trimming Score");
    println!("===================");
    println!("Full tree:       {:.1} pts", result.full_tree_score);
    println!("Trim:            {:.0}%", result.trim_percentage * 100.0);
    println!("Trim score:      {:.1} pts", result.trim_score);
    println!("Production time: {:.1} hr", summary.production_hours);
    println!("\n{}", result.breakdown);
    Ok(())
}

pub fn output_clearing(format: OutputFormat, result: &ClearingScoreResult) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }
    println!("\nLand Clearing");
    println!("=============");
    println!("Base score:      {:.2}", result.base_score);
    println!("Adjusted score:  {:.2}", result.adjusted_score);
    println!("Excavator:       {:.1} hr", result.excavator_hours);
    println!("Grubbing:        {:.1} hr", result.grubbing_hours);
    println!("Total:           {:.1} hr ({} days)", result.total_hours, result.total_days);
    Ok(())
}

pub fn output_clearing_price(format: OutputFormat, result: &ClearingPricingResult) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }
    println!("\nLand Clearing Price");
    println!("===================");
    println!("Adjusted score:  {:.2} ({} days)", result.adjusted_score, result.total_days);
    println!();
    println!("{:<12} {:>10} {:>12} {:>12}", "Phase", "Qty", "Cost", "Price");
    println!("{}", "-".repeat(49));
    println!(
        "{:<12} {:>7.1} hr {:>12.2} {:>12.2}",
        "Excavator", result.excavator_hours, result.excavator_cost, result.excavator_price
    );
    println!(
        "{:<12} {:>7.1} hr {:>12.2} {:>12.2}",
        "Grubbing", result.grubbing_hours, result.grubbing_cost, result.grubbing_price
    );
    println!(
        "{:<12} {:>5.0} loads {:>12.2} {:>12.2}",
        "Debris", result.truck_loads, result.debris_cost, result.debris_price
    );
    println!("{}", "-".repeat(49));
    println!("{:<23} {:>12.2} {:>12.2}", "Total", result.total_cost, result.total_price);
    println!("Profit:         ${:.2}", result.total_profit);
    Ok(())
}

pub fn output_gpm(format: OutputFormat, gpm: f64, rate: f64) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({ "gpm": gpm, "production_rate": rate }));
    }
    println!("{:.0} GPM -> {:.3} pts/hr", gpm, rate);
    Ok(())
}

pub fn output_project(format: OutputFormat, result: &ProjectPricingOutputs) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(result);
    }
    println!("\nProject Pricing");
    println!("===============");
    println!("Production:      {:.2} hr", result.production_hours);
    println!("Transport:       {:.2} hr", result.transport_hours);
    println!("Buffer:          {:.2} hr", result.buffer_hours);
    println!("Total:           {:.2} hr", result.total_hours);
    println!("Cost:            ${:.2}", result.total_cost);
    println!("\nPrice by margin:");
    for (tier, price) in result.prices.tiers() {
        println!("  {:<8} ${:>10.2}", tier.label(), price);
    }
    Ok(())
}

pub fn output_afiss_catalog(format: OutputFormat, entries: &[AfissCatalogEntry]) -> Result<()> {
    if format == OutputFormat::Json {
        let factors: Vec<_> = entries.iter().map(AfissCatalogEntry::to_factor).collect();
        return print_json(&factors);
    }
    println!("{:<24} {:<16} {:>6}  Description", "Key", "Category", "Add");
    println!("{}", "-".repeat(80));
    for e in entries {
        println!(
            "{:<24} {:<16} {:>5.0}%  {}",
            e.key,
            e.category.label(),
            e.percentage * 100.0,
            e.name
        );
    }
    Ok(())
}

pub fn output_afiss_selection(format: OutputFormat, entries: &[&AfissCatalogEntry], multiplier: f64) -> Result<()> {
    if format == OutputFormat::Json {
        let factors: Vec<_> = entries.iter().map(|e| e.to_factor()).collect();
        return print_json(&serde_json::json!({
            "factors": factors,
            "multiplier": multiplier,
        }));
    }
    for e in entries {
        println!("  +{:>3.0}%  {}", e.percentage * 100.0, e.name);
    }
    println!("AFISS multiplier: x{:.2}", multiplier);
    Ok(())
}

pub fn output_reports(format: OutputFormat, reports: &[CompletionReport], total: usize) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(reports);
    }
    println!("Completion Reports");
    println!("==================");
    println!("Total reports: {}", total);
    println!();

    if reports.is_empty() {
        println!("No reports found.");
        return Ok(());
    }

    println!(
        "{:<14} {:<18} {:>10} {:>10} {:>9} {:>10}",
        "Job", "Service", "Est.PpH", "Act.PpH", "Var.%", "Date"
    );
    println!("{}", "-".repeat(76));
    for r in reports {
        let job = if r.job_id.chars().count() > 13 {
            let head: String = r.job_id.chars().take(10).collect();
            format!("{}...", head)
        } else {
            r.job_id.clone()
        };
        println!(
            "{:<14} {:<18} {:>10.3} {:>10.3} {:>+9.1} {:>10}",
            job,
            r.service_type.label(),
            r.estimated_pph,
            r.actual_pph,
            r.variance_percent,
            r.completed_date.format("%Y-%m-%d")
        );
    }
    Ok(())
}

pub fn output_rates(format: OutputFormat, rows: &[RateRow]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(rows);
    }
    println!("{:<18} {:>12} {:>12}", "Service", "Rate", "Built-in");
    println!("{}", "-".repeat(44));
    for row in rows {
        println!(
            "{:<18} {:>12.4} {:>12.4}{}",
            row.service.label(),
            row.rate,
            row.builtin,
            if row.overridden { "  *" } else { "" }
        );
    }
    Ok(())
}

pub fn output_recalibrations(format: OutputFormat, recalibrations: &[RateRecalibration]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(recalibrations);
    }
    println!("Adaptive Production Rates");
    println!("=========================");
    for recal in recalibrations {
        let result = &recal.result;
        println!();
        println!("{}", recal.service);
        println!("  Current rate:  {:.4} pts/hr", recal.default_rate);
        println!(
            "  Adaptive rate: {:.4} pts/hr ({})",
            result.adaptive_rate, result.confidence_level
        );
        println!(
            "  Jobs:          {} in window, {} after trimming",
            result.sample_size, result.trimmed_sample_size
        );
        if !result.is_using_defaults {
            println!(
                "  Range:         {:.4} - {:.4} (median {:.4})",
                result.min_rate, result.max_rate, result.median_rate
            );
            println!(
                "  Difference:    {:+.1}% ({})",
                recal.comparison.percent_difference,
                recal.comparison.direction.label()
            );
        }
        println!("  {}", recal.description);
        println!("  {}", recal.comparison.recommendation);
    }
    Ok(())
}
