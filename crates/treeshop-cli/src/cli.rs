//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use treeshop_domain::model::{ClearingDensity, CrewExperience, DbhPackage, WeatherImpact};
use treeshop_types::{OutputFormat, ServiceType};

#[derive(Parser)]
#[command(name = "treeshop")]
#[command(author = "treeshop")]
#[command(version)]
#[command(about = "Point-based pricing for tree care and land clearing crews")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hourly ownership and operating cost of one piece of equipment
    Equipment {
        /// Purchase price ($)
        #[arg(long)]
        purchase_price: f64,

        /// Useful life (years)
        #[arg(long)]
        useful_life_years: f64,

        /// Operating hours per year
        #[arg(long)]
        annual_hours: f64,

        /// Finance cost per year ($)
        #[arg(long, default_value = "0")]
        finance: f64,

        /// Insurance per year ($)
        #[arg(long, default_value = "0")]
        insurance: f64,

        /// Registration per year ($)
        #[arg(long, default_value = "0")]
        registration: f64,

        /// Fuel burn (gallons per hour)
        #[arg(long, default_value = "0")]
        fuel_gph: f64,

        /// Fuel price ($ per gallon)
        #[arg(long, default_value = "0")]
        fuel_price: f64,

        /// Maintenance per year ($)
        #[arg(long, default_value = "0")]
        maintenance: f64,

        /// Repairs per year ($)
        #[arg(long, default_value = "0")]
        repairs: f64,
    },

    /// True hourly cost of an employee
    Employee {
        /// Base hourly wage ($)
        #[arg(long, short = 'r')]
        rate: f64,

        /// Burden multiplier (taxes, insurance, benefits)
        #[arg(long, short = 'b', default_value = "1.7")]
        burden: f64,
    },

    /// Hourly cost of a crew loadout, with billing rates
    Loadout {
        /// Equipment hourly costs (comma separated)
        #[arg(long, value_delimiter = ',')]
        equipment: Vec<f64>,

        /// Employee true hourly costs (comma separated)
        #[arg(long, value_delimiter = ',')]
        employees: Vec<f64>,

        /// Overhead per hour ($)
        #[arg(long, default_value = "0")]
        overhead: f64,
    },

    /// Billing rates at each profit margin tier
    Billing {
        /// Hourly cost ($)
        cost: f64,
    },

    /// Forestry mulching score
    Mulching {
        /// Acres to mulch
        #[arg(long, short = 'a')]
        acres: f64,

        /// DBH package in inches (4, 6, 8, 10, 15)
        #[arg(long, short = 'd')]
        dbh: DbhPackage,

        /// AFISS factor keys (comma separated, see `treeshop afiss`)
        #[arg(long, value_delimiter = ',')]
        afiss: Vec<String>,
    },

    /// Stump grinding score for a single stump
    Stump {
        /// Diameter (inches)
        #[arg(long)]
        diameter: f64,

        /// Height above grade (inches)
        #[arg(long, default_value = "0")]
        height_above: f64,

        /// Grind depth below grade (inches)
        #[arg(long, default_value = "0")]
        grind_depth: f64,

        #[arg(long)]
        hardwood: bool,

        #[arg(long)]
        root_flare: bool,

        #[arg(long)]
        rotten: bool,

        #[arg(long)]
        rocks: bool,

        #[arg(long)]
        tight_landscaping: bool,
    },

    /// Tree removal score
    Tree {
        /// Height (feet)
        #[arg(long)]
        height: f64,

        /// Diameter at breast height (inches)
        #[arg(long)]
        dbh: f64,

        /// Canopy radius (feet)
        #[arg(long)]
        canopy_radius: f64,
    },

    /// Tree trimming score
    Trim {
        /// Height (feet)
        #[arg(long)]
        height: f64,

        /// Diameter at breast height (inches)
        #[arg(long)]
        dbh: f64,

        /// Canopy radius (feet)
        #[arg(long)]
        canopy_radius: f64,

        /// Share of the tree removed (0.0-1.0)
        #[arg(long, short = 'p')]
        percent: f64,
    },

    /// Land clearing score and schedule
    Clearing {
        /// Acres to clear
        #[arg(long, short = 'a')]
        acres: f64,

        /// Vegetation density (light, average, heavy)
        #[arg(long, short = 'd', default_value = "average")]
        density: ClearingDensity,

        /// AFISS factor keys (comma separated)
        #[arg(long, value_delimiter = ',')]
        afiss: Vec<String>,
    },

    /// Land clearing price by phase
    ClearingPrice {
        /// Acres to clear
        #[arg(long, short = 'a')]
        acres: f64,

        /// Vegetation density (light, average, heavy)
        #[arg(long, short = 'd', default_value = "average")]
        density: ClearingDensity,

        /// AFISS factor keys (comma separated)
        #[arg(long, value_delimiter = ',')]
        afiss: Vec<String>,

        /// Loadout hourly cost ($)
        #[arg(long)]
        loadout_rate: f64,

        /// Excavator rental per hour ($)
        #[arg(long, default_value = "0")]
        excavator_rental: f64,

        /// Debris truck loads. Estimated from acreage if not specified.
        #[arg(long)]
        truck_loads: Option<f64>,

        /// Cost per debris load ($)
        #[arg(long, default_value = "0")]
        cost_per_load: f64,

        #[arg(long, default_value = "0.5")]
        excavator_margin: f64,

        #[arg(long, default_value = "0.4")]
        grubbing_margin: f64,

        #[arg(long, default_value = "0.2")]
        debris_margin: f64,
    },

    /// Mulching production rate from carrier hydraulic flow
    Gpm {
        /// Hydraulic flow (gallons per minute)
        gpm: f64,
    },

    /// Price a project from its score
    Project {
        /// Service line, used to look up the production rate
        #[arg(long, short = 's', value_enum)]
        service: ServiceType,

        /// Project score (points)
        #[arg(long)]
        score: f64,

        /// Production rate override (points per hour)
        #[arg(long)]
        rate: Option<f64>,

        /// One-way drive time (minutes)
        #[arg(long, default_value = "0")]
        drive_minutes: f64,

        /// Loadout hourly cost ($)
        #[arg(long)]
        loadout_rate: f64,

        /// Share of round-trip drive time billed. Uses config value if not specified.
        #[arg(long)]
        transport_fraction: Option<f64>,

        /// Contingency buffer. Uses config value if not specified.
        #[arg(long)]
        buffer: Option<f64>,
    },

    /// List AFISS factors, or compute the multiplier for a selection
    Afiss {
        /// Factor keys or names
        factors: Vec<String>,
    },

    /// Record and import job completion reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Show current production rates per service line
    Rates,

    /// Recalibrate production rates from recent completion reports
    Adaptive {
        /// Only this service line
        #[arg(long, short = 's', value_enum)]
        service: Option<ServiceType>,

        /// Lookback window (days). Uses config value if not specified.
        #[arg(long)]
        lookback_days: Option<i64>,

        /// Minimum reports required. Uses config value if not specified.
        #[arg(long)]
        min_data_points: Option<usize>,

        /// Fraction trimmed from each end. Uses config value if not specified.
        #[arg(long)]
        trim: Option<f64>,

        /// Save high and medium confidence rates to the rates file
        #[arg(long)]
        apply: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set completion report store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set production rates file
        #[arg(long)]
        set_rates_file: Option<PathBuf>,

        /// Set billed share of drive time (0.0-1.0)
        #[arg(long)]
        set_transport_fraction: Option<f64>,

        /// Set contingency buffer (0.0-1.0)
        #[arg(long)]
        set_buffer: Option<f64>,

        /// Set adaptive lookback window (days)
        #[arg(long)]
        set_lookback_days: Option<i64>,

        /// Set minimum reports for an adaptive rate
        #[arg(long)]
        set_min_data_points: Option<usize>,

        /// Set outlier trim fraction (0.0-0.5)
        #[arg(long)]
        set_trim: Option<f64>,

        /// Set medium confidence CV threshold
        #[arg(long)]
        set_cv_threshold: Option<f64>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Record a completed job
    Add {
        /// Work order or job identifier
        #[arg(long)]
        job_id: String,

        #[arg(long, short = 's', value_enum)]
        service: ServiceType,

        #[arg(long)]
        estimated_hours: f64,

        #[arg(long)]
        actual_hours: f64,

        #[arg(long)]
        estimated_score: f64,

        /// Actual score. Same as the estimate if not specified.
        #[arg(long)]
        actual_score: Option<f64>,

        /// Completion date (YYYY-MM-DD). Today if not specified.
        #[arg(long)]
        date: Option<String>,

        /// Weather impact (none, minor, moderate, severe)
        #[arg(long, default_value = "none")]
        weather: WeatherImpact,

        /// Crew experience (novice, intermediate, experienced, expert)
        #[arg(long, default_value = "intermediate")]
        crew: CrewExperience,

        #[arg(long)]
        equipment_issues: bool,

        /// AFISS multiplier realised on site
        #[arg(long)]
        site_complexity: Option<f64>,

        #[arg(long, short = 'n')]
        notes: Option<String>,
    },

    /// Import completion reports from CSV
    Import {
        /// CSV file path
        file: PathBuf,
    },

    /// List stored completion reports, newest first
    List {
        #[arg(long, short = 's', value_enum)]
        service: Option<ServiceType>,

        /// Limit number of entries shown
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mulching() {
        let cli = Cli::try_parse_from([
            "treeshop", "mulching", "--acres", "3.5", "--dbh", "6", "--afiss", "power_lines,steep_slope",
        ])
        .unwrap();
        match cli.command {
            Commands::Mulching { acres, dbh, afiss } => {
                assert_eq!(acres, 3.5);
                assert_eq!(dbh, DbhPackage::Inches6);
                assert_eq!(afiss, vec!["power_lines", "steep_slope"]);
            }
            _ => panic!("expected mulching command"),
        }
    }

    #[test]
    fn test_invalid_dbh_package_rejected() {
        assert!(Cli::try_parse_from(["treeshop", "mulching", "--acres", "1", "--dbh", "7"]).is_err());
    }

    #[test]
    fn test_parse_stump_flags() {
        let cli = Cli::try_parse_from([
            "treeshop", "stump", "--diameter", "18", "--height-above", "1", "--grind-depth", "1", "--hardwood",
        ])
        .unwrap();
        match cli.command {
            Commands::Stump {
                diameter,
                hardwood,
                rotten,
                ..
            } => {
                assert_eq!(diameter, 18.0);
                assert!(hardwood);
                assert!(!rotten);
            }
            _ => panic!("expected stump command"),
        }
    }

    #[test]
    fn test_clearing_density_default() {
        let cli = Cli::try_parse_from(["treeshop", "clearing", "--acres", "2"]).unwrap();
        match cli.command {
            Commands::Clearing { density, afiss, .. } => {
                assert_eq!(density, ClearingDensity::Average);
                assert!(afiss.is_empty());
            }
            _ => panic!("expected clearing command"),
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["treeshop", "gpm", "34", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Gpm { gpm } if gpm == 34.0));
    }

    #[test]
    fn test_parse_report_add() {
        let cli = Cli::try_parse_from([
            "treeshop",
            "report",
            "add",
            "--job-id",
            "WO-42",
            "--service",
            "stump-grinding",
            "--estimated-hours",
            "4",
            "--actual-hours",
            "5",
            "--estimated-score",
            "1800",
            "--weather",
            "minor",
        ])
        .unwrap();
        match cli.command {
            Commands::Report {
                action:
                    ReportAction::Add {
                        job_id,
                        service,
                        actual_score,
                        weather,
                        crew,
                        ..
                    },
            } => {
                assert_eq!(job_id, "WO-42");
                assert_eq!(service, ServiceType::StumpGrinding);
                assert!(actual_score.is_none());
                assert_eq!(weather, WeatherImpact::Minor);
                assert_eq!(crew, CrewExperience::Intermediate);
            }
            _ => panic!("expected report add"),
        }
    }

    #[test]
    fn test_parse_adaptive_overrides() {
        let cli = Cli::try_parse_from([
            "treeshop", "adaptive", "--service", "forestry-mulching", "--min-data-points", "5", "--apply",
        ])
        .unwrap();
        match cli.command {
            Commands::Adaptive {
                service,
                min_data_points,
                lookback_days,
                apply,
                ..
            } => {
                assert_eq!(service, Some(ServiceType::ForestryMulching));
                assert_eq!(min_data_points, Some(5));
                assert!(lookback_days.is_none());
                assert!(apply);
            }
            _ => panic!("expected adaptive command"),
        }
    }

    #[test]
    fn test_missing_required_arg() {
        assert!(Cli::try_parse_from(["treeshop", "employee"]).is_err());
    }
}
