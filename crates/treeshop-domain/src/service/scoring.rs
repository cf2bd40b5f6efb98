//! Work-volume scores for mulching, stump grinding, and tree work

use crate::model::{AfissFactor, DbhPackage, StumpInputs, TreeInputs, TreeTrimmingResult};

/// Condition modifiers for stump grinding, applied in this order
pub const STUMP_MODIFIERS: [(StumpCondition, f64); 5] = [
    (StumpCondition::Hardwood, 1.15),
    (StumpCondition::LargeRootFlare, 1.20),
    (StumpCondition::Rotten, 0.85),
    (StumpCondition::RocksInRootZone, 1.10),
    (StumpCondition::TightLandscaping, 1.15),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StumpCondition {
    Hardwood,
    LargeRootFlare,
    Rotten,
    RocksInRootZone,
    TightLandscaping,
}

impl StumpCondition {
    fn applies_to(&self, stump: &StumpInputs) -> bool {
        match self {
            StumpCondition::Hardwood => stump.is_hardwood,
            StumpCondition::LargeRootFlare => stump.has_large_root_flare,
            StumpCondition::Rotten => stump.is_rotten,
            StumpCondition::RocksInRootZone => stump.has_rocks_in_root_zone,
            StumpCondition::TightLandscaping => stump.is_tight_landscaping,
        }
    }
}

/// Sum of selected AFISS percentages as a multiplier: `1 + Σ percentage`
pub fn afiss_multiplier(factors: &[AfissFactor]) -> f64 {
    1.0 + factors.iter().map(|f| f.percentage).sum::<f64>()
}

/// Forestry mulching score = acreage x DBH package x AFISS multiplier
pub fn forestry_mulching_score(acreage: f64, package: DbhPackage, afiss_multiplier: f64) -> f64 {
    acreage * package.inches() * afiss_multiplier
}

/// Multipliers of the conditions that apply to this stump, in application order
pub fn stump_modifier_factors(stump: &StumpInputs) -> impl Iterator<Item = f64> + '_ {
    STUMP_MODIFIERS
        .iter()
        .filter(move |(condition, _)| condition.applies_to(stump))
        .map(|(_, factor)| *factor)
}

/// StumpScore = diameter² x (height above + grind depth), then every applicable modifier
pub fn stump_score(stump: &StumpInputs) -> f64 {
    let base = stump.diameter_inches * stump.diameter_inches
        * (stump.height_above_inches + stump.grind_depth_below_inches);
    stump_modifier_factors(stump).fold(base, |score, factor| score * factor)
}

/// Total StumpScore for a job with several stumps
pub fn stump_job_score(stumps: &[StumpInputs]) -> f64 {
    stumps.iter().map(stump_score).sum()
}

/// TreeShop Score = height x (DBH / 12)² x canopy radius²
///
/// DBH is converted from inches to feet before squaring.
pub fn tree_score(tree: &TreeInputs) -> f64 {
    let dbh_feet = tree.dbh_inches / 12.0;
    tree.height_feet * dbh_feet.powi(2) * tree.canopy_radius_feet.powi(2)
}

/// Total TreeShop Score for a removal job with several trees
pub fn tree_removal_score(trees: &[TreeInputs]) -> f64 {
    trees.iter().map(tree_score).sum()
}

/// Trimming is priced as a fraction of the full tree score
pub fn tree_trimming(tree: &TreeInputs, trim_percentage: f64) -> TreeTrimmingResult {
    let full_tree_score = tree_score(tree);
    let trim_score = full_tree_score * trim_percentage;
    let breakdown = format!(
        "Full tree: {} ft x ({} in / 12)² x {} ft² = {:.1} pts; trimming {:.0}% = {:.1} pts",
        tree.height_feet,
        tree.dbh_inches,
        tree.canopy_radius_feet,
        full_tree_score,
        trim_percentage * 100.0,
        trim_score
    );

    TreeTrimmingResult {
        full_tree_score,
        trim_percentage,
        trim_score,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AfissCategory;
    use proptest::prelude::*;

    fn oak() -> TreeInputs {
        TreeInputs {
            height_feet: 40.0,
            dbh_inches: 18.0,
            canopy_radius_feet: 15.0,
        }
    }

    #[test]
    fn test_afiss_multiplier() {
        let factors = vec![
            AfissFactor::new(AfissCategory::Access, "Narrow gate", 0.10),
            AfissFactor::new(AfissCategory::Safety, "Power lines", 0.25),
        ];
        assert!((afiss_multiplier(&factors) - 1.35).abs() < 1e-12);
        assert_eq!(afiss_multiplier(&[]), 1.0);
    }

    #[test]
    fn test_forestry_mulching_score() {
        // 3.5 acres x 6" package x 1.2 = 25.2
        let score = forestry_mulching_score(3.5, DbhPackage::Inches6, 1.2);
        assert!((score - 25.2).abs() < 1e-9);
    }

    // ==========================================
    // Stump grinding
    // ==========================================

    #[test]
    fn test_stump_score_hardwood() {
        let stump = StumpInputs {
            diameter_inches: 18.0,
            height_above_inches: 1.0,
            grind_depth_below_inches: 1.0,
            is_hardwood: true,
            ..Default::default()
        };
        // 18² x 2 x 1.15 = 745.2
        assert!((stump_score(&stump) - 745.2).abs() < 1e-9);
        assert_eq!(stump_score(&stump), 324.0 * 2.0 * 1.15);
    }

    #[test]
    fn test_stump_score_no_modifiers() {
        let stump = StumpInputs {
            diameter_inches: 24.0,
            height_above_inches: 6.0,
            grind_depth_below_inches: 12.0,
            ..Default::default()
        };
        assert_eq!(stump_score(&stump), 576.0 * 18.0);
    }

    #[test]
    fn test_stump_score_all_modifiers_in_order() {
        let stump = StumpInputs {
            diameter_inches: 10.0,
            height_above_inches: 2.0,
            grind_depth_below_inches: 8.0,
            is_hardwood: true,
            has_large_root_flare: true,
            is_rotten: true,
            has_rocks_in_root_zone: true,
            is_tight_landscaping: true,
        };
        let expected = 1000.0 * 1.15 * 1.20 * 0.85 * 1.10 * 1.15;
        assert_eq!(stump_score(&stump), expected);
    }

    #[test]
    fn test_stump_job_score_sums() {
        let a = StumpInputs {
            diameter_inches: 12.0,
            height_above_inches: 1.0,
            grind_depth_below_inches: 1.0,
            ..Default::default()
        };
        let b = StumpInputs { is_rotten: true, ..a };
        assert!((stump_job_score(&[a, b]) - (288.0 + 288.0 * 0.85)).abs() < 1e-9);
        assert_eq!(stump_job_score(&[]), 0.0);
    }

    proptest! {
        #[test]
        fn prop_stump_modifiers_commute(
            diameter in 1.0f64..60.0,
            depth in 0.0f64..24.0,
            flags in proptest::array::uniform5(any::<bool>()),
            order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle(),
        ) {
            let stump = StumpInputs {
                diameter_inches: diameter,
                height_above_inches: 0.0,
                grind_depth_below_inches: depth,
                is_hardwood: flags[0],
                has_large_root_flare: flags[1],
                is_rotten: flags[2],
                has_rocks_in_root_zone: flags[3],
                is_tight_landscaping: flags[4],
            };
            let factors: Vec<f64> = STUMP_MODIFIERS.iter().map(|(_, f)| *f).collect();
            let shuffled = order
                .iter()
                .filter(|&&i| flags[i])
                .fold(diameter * diameter * depth, |acc, &i| acc * factors[i]);
            let score = stump_score(&stump);
            prop_assert!((score - shuffled).abs() <= 1e-9 * score.abs().max(1.0));
        }
    }

    // ==========================================
    // Tree removal and trimming
    // ==========================================

    #[test]
    fn test_tree_score() {
        // 40 x (18/12)² x 15² = 40 x 2.25 x 225 = 20250
        assert_eq!(tree_score(&oak()), 20250.0);
    }

    #[test]
    fn test_tree_removal_score() {
        let pine = TreeInputs {
            height_feet: 60.0,
            dbh_inches: 12.0,
            canopy_radius_feet: 10.0,
        };
        assert_eq!(tree_removal_score(&[oak(), pine]), 20250.0 + 6000.0);
    }

    #[test]
    fn test_tree_trimming_quarter() {
        let result = tree_trimming(&oak(), 0.25);
        assert_eq!(result.full_tree_score, 20250.0);
        assert_eq!(result.trim_score, 5062.5);
        assert!(result.breakdown.contains("20250.0"));
        assert!(result.breakdown.contains("25%"));
        assert!(result.breakdown.contains("5062.5"));
    }

    #[test]
    fn test_zero_dbh_scores_zero() {
        let sapling = TreeInputs {
            dbh_inches: 0.0,
            ..oak()
        };
        assert_eq!(tree_score(&sapling), 0.0);
    }
}
