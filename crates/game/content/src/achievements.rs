//! The fixed achievement catalog.

use wyrm_core::{AchievementCategory, AchievementCriteria, AchievementSpec, Element};

/// Every achievement, in display order.
pub const ACHIEVEMENTS: &[AchievementSpec] = &[
    AchievementSpec::new(
        1,
        "First Fragment",
        "Attune your first elemental fragment",
        AchievementCategory::Discovery,
        AchievementCriteria::AttuneAny,
        1,
    ),
    AchievementSpec::new(
        2,
        "Dragon Collector",
        "Attune all four fragment elements at least once",
        AchievementCategory::Discovery,
        AchievementCriteria::AttuneAll,
        4,
    ),
    AchievementSpec::new(
        3,
        "Fire Tamer",
        "Master both fire abilities (use each 10 times)",
        AchievementCategory::Mastery,
        AchievementCriteria::ElementMastery(Element::Fire),
        10,
    ),
    AchievementSpec::new(
        4,
        "Wind Walker",
        "Master both wind abilities (use each 10 times)",
        AchievementCategory::Mastery,
        AchievementCriteria::ElementMastery(Element::Wind),
        10,
    ),
    AchievementSpec::new(
        5,
        "Stone Guardian",
        "Master both earth abilities (use each 10 times)",
        AchievementCategory::Mastery,
        AchievementCriteria::ElementMastery(Element::Earth),
        10,
    ),
    AchievementSpec::new(
        6,
        "Void Walker",
        "Master both void abilities (use each 10 times)",
        AchievementCategory::Mastery,
        AchievementCriteria::ElementMastery(Element::Void),
        10,
    ),
    AchievementSpec::new(
        7,
        "Dragon Inheritor",
        "Master every fragment ability",
        AchievementCategory::Mastery,
        AchievementCriteria::MasterAll,
        8,
    ),
    AchievementSpec::new(
        8,
        "Lore Seeker",
        "Unlock 5 chronicle pages",
        AchievementCategory::LoreHunter,
        AchievementCriteria::PagesUnlocked,
        5,
    ),
    AchievementSpec::new(
        9,
        "Lore Master",
        "Unlock every chronicle page",
        AchievementCategory::LoreHunter,
        AchievementCriteria::PagesUnlocked,
        19,
    ),
    AchievementSpec::new(
        10,
        "Storm Caller",
        "Call down the lightning for the first time",
        AchievementCategory::Storm,
        AchievementCriteria::LightningUses,
        1,
    ),
    AchievementSpec::new(
        11,
        "Storm Herald",
        "Use the lightning ability 25 times",
        AchievementCategory::Storm,
        AchievementCriteria::LightningUses,
        25,
    ),
    AchievementSpec::new(
        12,
        "Stormbringer",
        "Use the lightning ability 100 times",
        AchievementCategory::Storm,
        AchievementCriteria::LightningUses,
        100,
    ),
];
