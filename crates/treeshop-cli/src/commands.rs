//! Command handlers

use chrono::Utc;
use std::path::PathBuf;
use tracing::info;
use treeshop_app::app::{apply_recalibrations, recalibrate_all, recalibrate_service};
use treeshop_app::config::Config;
use treeshop_app::constants::{afiss_multiplier_for, builtin_rate, find_afiss_factor, ProductionRates, AFISS_CATALOG};
use treeshop_app::repository::{load_production_rates, open_report_repo, save_production_rates};
use treeshop_domain::model::{
    ClearingPricingInputs, CompletionReport, CrewExperience, DbhPackage,
    EmployeeCostInputs, EquipmentCostInputs, JobMeasurements, LoadoutCostInputs,
    ProjectPricingInputs, StumpInputs, TreeInputs, WeatherImpact,
};
use treeshop_domain::service::{
    billing_rates, clearing_pricing, clearing_score, employee_cost, equipment_cost,
    forestry_mulching_score, loadout_cost, production_rate_from_gpm, project_pricing, stump_score,
    tree_score, tree_trimming, AdaptiveRateConfig, AdaptiveRateEstimator,
};
use treeshop_domain::CompletionReportRepository;
use treeshop_infra::completion_csv::{load_reports_from_csv, parse_completed_date};
use treeshop_types::{Error, OutputFormat, Result, ServiceType};

use crate::cli::{Cli, Commands, ReportAction};
use crate::output::{self, RateRow, ScoreSummary};

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Equipment {
            purchase_price,
            useful_life_years,
            annual_hours,
            finance,
            insurance,
            registration,
            fuel_gph,
            fuel_price,
            maintenance,
            repairs,
        } => {
            let inputs = EquipmentCostInputs {
                purchase_price: *purchase_price,
                useful_life_years: *useful_life_years,
                annual_hours: *annual_hours,
                finance_cost_per_year: *finance,
                insurance_per_year: *insurance,
                registration_per_year: *registration,
                fuel_gallons_per_hour: *fuel_gph,
                fuel_price_per_gallon: *fuel_price,
                maintenance_per_year: *maintenance,
                repairs_per_year: *repairs,
            };
            output::output_equipment(format, &equipment_cost(&inputs))
        }

        Commands::Employee { rate, burden } => {
            let cost = employee_cost(&EmployeeCostInputs {
                base_hourly_rate: *rate,
                burden_multiplier: *burden,
            });
            output::output_employee(format, *rate, *burden, cost)
        }

        Commands::Loadout {
            equipment,
            employees,
            overhead,
        } => {
            let result = loadout_cost(&LoadoutCostInputs {
                equipment_costs: equipment.clone(),
                employee_costs: employees.clone(),
                overhead_per_hour: *overhead,
            });
            output::output_loadout(format, &result, &billing_rates(result.total_cost))
        }

        Commands::Billing { cost } => output::output_billing(format, *cost, &billing_rates(*cost)),

        Commands::Mulching { acres, dbh, afiss } => cmd_mulching(&config, format, *acres, *dbh, afiss),

        Commands::Stump {
            diameter,
            height_above,
            grind_depth,
            hardwood,
            root_flare,
            rotten,
            rocks,
            tight_landscaping,
        } => {
            let stump = StumpInputs {
                diameter_inches: *diameter,
                height_above_inches: *height_above,
                grind_depth_below_inches: *grind_depth,
                is_hardwood: *hardwood,
                has_large_root_flare: *root_flare,
                is_rotten: *rotten,
                has_rocks_in_root_zone: *rocks,
                is_tight_landscaping: *tight_landscaping,
            };
            let rates = load_production_rates(&config)?;
            let service = ServiceType::StumpGrinding;
            let summary = ScoreSummary::new(service, stump_score(&stump), None, rates.rate_for(service));
            output::output_score(format, &summary)
        }

        Commands::Tree {
            height,
            dbh,
            canopy_radius,
        } => {
            let tree = TreeInputs {
                height_feet: *height,
                dbh_inches: *dbh,
                canopy_radius_feet: *canopy_radius,
            };
            let rates = load_production_rates(&config)?;
            let service = ServiceType::TreeRemoval;
            let summary = ScoreSummary::new(service, tree_score(&tree), None, rates.rate_for(service));
            output::output_score(format, &summary)
        }

        Commands::Trim {
            height,
            dbh,
            canopy_radius,
            percent,
        } => {
            let tree = TreeInputs {
                height_feet: *height,
                dbh_inches: *dbh,
                canopy_radius_feet: *canopy_radius,
            };
            let result = tree_trimming(&tree, *percent);
            let rates = load_production_rates(&config)?;
            let service = ServiceType::TreeTrimming;
            let summary = ScoreSummary::new(service, result.trim_score, None, rates.rate_for(service));
            output::output_trimming(format, &result, &summary)
        }

        Commands::Clearing { acres, density, afiss } => {
            let multiplier = afiss_multiplier_for(afiss.as_slice())?;
            output::output_clearing(format, &clearing_score(*acres, *density, multiplier))
        }

        Commands::ClearingPrice {
            acres,
            density,
            afiss,
            loadout_rate,
            excavator_rental,
            truck_loads,
            cost_per_load,
            excavator_margin,
            grubbing_margin,
            debris_margin,
        } => {
            let inputs = ClearingPricingInputs {
                acres: *acres,
                density: *density,
                afiss_multiplier: afiss_multiplier_for(afiss.as_slice())?,
                loadout_hourly_rate: *loadout_rate,
                excavator_rental_per_hour: *excavator_rental,
                truck_loads: *truck_loads,
                cost_per_load: *cost_per_load,
                excavator_margin: *excavator_margin,
                grubbing_margin: *grubbing_margin,
                debris_margin: *debris_margin,
            };
            output::output_clearing_price(format, &clearing_pricing(&inputs))
        }

        Commands::Gpm { gpm } => output::output_gpm(format, *gpm, production_rate_from_gpm(*gpm)),

        Commands::Project {
            service,
            score,
            rate,
            drive_minutes,
            loadout_rate,
            transport_fraction,
            buffer,
        } => {
            let production_rate = match rate {
                Some(r) => *r,
                None => load_production_rates(&config)?.rate_for(*service),
            };
            let inputs = ProjectPricingInputs {
                score: *score,
                production_rate,
                drive_time_one_way_minutes: *drive_minutes,
                transport_billing_fraction: transport_fraction.unwrap_or(config.transport_billing_fraction),
                loadout_hourly_rate: *loadout_rate,
                buffer_fraction: buffer.unwrap_or(config.buffer_fraction),
            };
            output::output_project(format, &project_pricing(&inputs))
        }

        Commands::Afiss { factors } => cmd_afiss(format, factors),

        Commands::Report { action } => match action {
            ReportAction::Add {
                job_id,
                service,
                estimated_hours,
                actual_hours,
                estimated_score,
                actual_score,
                date,
                weather,
                crew,
                equipment_issues,
                site_complexity,
                notes,
            } => {
                let measurements = JobMeasurements {
                    estimated_hours: *estimated_hours,
                    actual_hours: *actual_hours,
                    estimated_score: *estimated_score,
                    actual_score: actual_score.unwrap_or(*estimated_score),
                };
                let report = build_report(
                    job_id,
                    *service,
                    date.as_deref(),
                    measurements,
                    (*weather, *crew, *equipment_issues),
                    *site_complexity,
                    notes.clone(),
                )?;
                cmd_report_add(&config, &report)
            }
            ReportAction::Import { file } => cmd_report_import(&config, file.clone()),
            ReportAction::List { service, limit } => cmd_report_list(&config, format, *service, *limit),
        },

        Commands::Rates => {
            let rates = load_production_rates(&config)?;
            output::output_rates(format, &rate_rows(&rates))
        }

        Commands::Adaptive {
            service,
            lookback_days,
            min_data_points,
            trim,
            apply,
        } => {
            let adaptive = merge_adaptive_config(config.adaptive, *lookback_days, *min_data_points, *trim);
            cmd_adaptive(&config, format, adaptive, *service, *apply)
        }

        Commands::Config {
            show,
            set_output,
            set_store_dir,
            set_rates_file,
            set_transport_fraction,
            set_buffer,
            set_lookback_days,
            set_min_data_points,
            set_trim,
            set_cv_threshold,
            reset,
        } => {
            if *reset {
                let config = Config::default();
                config.save()?;
                println!("Configuration reset to defaults");
                println!("\n{}", config);
                return Ok(());
            }

            let mut config = config;
            let mut modified = false;

            if let Some(output_format) = set_output {
                config.output_format = *output_format;
                modified = true;
            }

            if let Some(dir) = set_store_dir {
                config.store_dir = Some(dir.clone());
                modified = true;
            }

            if let Some(path) = set_rates_file {
                config.rates_file = Some(path.clone());
                modified = true;
            }

            if let Some(fraction) = set_transport_fraction {
                config.transport_billing_fraction = *fraction;
                modified = true;
            }

            if let Some(buffer) = set_buffer {
                config.buffer_fraction = *buffer;
                modified = true;
            }

            if let Some(days) = set_lookback_days {
                config.adaptive.lookback_days = *days;
                modified = true;
            }

            if let Some(points) = set_min_data_points {
                config.adaptive.minimum_data_points = *points;
                modified = true;
            }

            if let Some(trim) = set_trim {
                config.adaptive.outlier_trim_percent = *trim;
                modified = true;
            }

            if let Some(threshold) = set_cv_threshold {
                config.adaptive.confidence_threshold = *threshold;
                modified = true;
            }

            if modified {
                config.save()?;
                println!("Configuration updated");
            }

            if *show || !modified {
                println!("\n{}", config);
            }

            Ok(())
        }
    }
}

fn cmd_mulching(config: &Config, format: OutputFormat, acres: f64, dbh: DbhPackage, afiss: &[String]) -> Result<()> {
    let multiplier = afiss_multiplier_for(afiss)?;
    let score = forestry_mulching_score(acres, dbh, multiplier);
    let rates = load_production_rates(config)?;
    let service = ServiceType::ForestryMulching;
    let summary = ScoreSummary::new(service, score, Some(multiplier), rates.rate_for(service));
    output::output_score(format, &summary)
}

fn cmd_afiss(format: OutputFormat, factors: &[String]) -> Result<()> {
    if factors.is_empty() {
        return output::output_afiss_catalog(format, AFISS_CATALOG);
    }

    let entries = factors
        .iter()
        .map(|name| find_afiss_factor(name).ok_or_else(|| Error::UnknownAfissFactor(name.clone())))
        .collect::<Result<Vec<_>>>()?;
    let multiplier = afiss_multiplier_for(factors)?;
    output::output_afiss_selection(format, &entries, multiplier)
}

fn build_report(
    job_id: &str,
    service: ServiceType,
    date: Option<&str>,
    measurements: JobMeasurements,
    conditions: (WeatherImpact, CrewExperience, bool),
    site_complexity: Option<f64>,
    notes: Option<String>,
) -> Result<CompletionReport> {
    let completed_date = match date {
        Some(d) => parse_completed_date(d)
            .ok_or_else(|| Error::InvalidInput(format!("unrecognised date '{}'", d)))?,
        None => Utc::now(),
    };

    let (weather, crew, equipment_issues) = conditions;
    let mut report = CompletionReport::from_job(job_id, service, completed_date, measurements)
        .with_conditions(weather, crew, equipment_issues);
    if let Some(multiplier) = site_complexity {
        report = report.with_site_complexity(multiplier);
    }
    if let Some(notes) = notes {
        report = report.with_notes(notes);
    }
    Ok(report)
}

fn cmd_report_add(config: &Config, report: &CompletionReport) -> Result<()> {
    let repo = open_report_repo(config)?;
    repo.save(report)?;

    println!(
        "Recorded {} ({}): {:.3} pts/hr actual vs {:.3} estimated ({:+.1}% hours)",
        report.job_id,
        report.service_type,
        report.actual_pph,
        report.estimated_pph,
        report.variance_percent
    );
    Ok(())
}

fn cmd_report_import(config: &Config, file: PathBuf) -> Result<()> {
    let reports = load_reports_from_csv(&file)?;
    let repo = open_report_repo(config)?;
    let added = repo.save_all(&reports)?;

    println!("Imported {} of {} reports from {}", added, reports.len(), file.display());
    println!("Store: {}", repo.store_path().display());
    Ok(())
}

fn cmd_report_list(config: &Config, format: OutputFormat, service: Option<ServiceType>, limit: usize) -> Result<()> {
    let repo = open_report_repo(config)?;
    let reports: Vec<CompletionReport> = repo
        .all_reports()
        .into_iter()
        .filter(|r| service.map_or(true, |s| r.service_type == s))
        .take(limit)
        .collect();
    output::output_reports(format, &reports, repo.len())
}

fn rate_rows(rates: &ProductionRates) -> Vec<RateRow> {
    ServiceType::ALL
        .iter()
        .map(|&service| RateRow {
            service,
            rate: rates.rate_for(service),
            builtin: builtin_rate(service),
            overridden: rates.rates.contains_key(&service),
        })
        .collect()
}

/// Command-line values win over the configured estimator settings
fn merge_adaptive_config(
    mut adaptive: AdaptiveRateConfig,
    lookback_days: Option<i64>,
    min_data_points: Option<usize>,
    trim: Option<f64>,
) -> AdaptiveRateConfig {
    if let Some(days) = lookback_days {
        adaptive.lookback_days = days;
    }
    if let Some(points) = min_data_points {
        adaptive.minimum_data_points = points;
    }
    if let Some(trim) = trim {
        adaptive.outlier_trim_percent = trim;
    }
    adaptive
}

fn cmd_adaptive(
    config: &Config,
    format: OutputFormat,
    adaptive: AdaptiveRateConfig,
    service: Option<ServiceType>,
    apply: bool,
) -> Result<()> {
    let estimator = AdaptiveRateEstimator::new(adaptive);
    let repo = open_report_repo(config)?;
    let mut rates = load_production_rates(config)?;
    let now = Utc::now();

    let recalibrations = match service {
        Some(service) => vec![recalibrate_service(&repo, &estimator, &rates, service, now)?],
        None => recalibrate_all(&repo, &estimator, &rates, now)?,
    };
    output::output_recalibrations(format, &recalibrations)?;

    if apply {
        let updated = apply_recalibrations(&mut rates, &recalibrations);
        if updated.is_empty() {
            eprintln!("\nNo rates adopted: only high or medium confidence results are applied.");
        } else {
            save_production_rates(config, &rates)?;
            info!(count = updated.len(), "production rates saved");
            eprintln!("\nUpdated rates for {} service line(s).", updated.len());
        }
    }
    Ok(())
}
