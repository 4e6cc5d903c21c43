//! The Chronicle of the Fallen Dragons — fixed page catalog.
//!
//! Nineteen pages across seven chapters. The introduction is always
//! readable; each dragon's chapter unlocks at escalating usage totals for
//! its element; the Fall chapter unlocks once every fragment has been
//! attuned; the Recovery chapter unlocks with full mastery.

use wyrm_core::{Element, PageSpec, UnlockTrigger};

/// Every chronicle page, in reading order.
pub const CHRONICLE: &[PageSpec] = &[
    // ==================== INTRODUCTION ====================
    PageSpec::new(
        1,
        "The Chronicle of the Fallen Dragons",
        "In ages past, four elemental dragons ruled fire, wind, earth, and \
         the void between stars. This chronicle tells their tale: cosmic \
         beings who shaped the world, scattered into fragments, waiting for \
         those worthy enough to claim them. Turn these pages and learn what \
         came before.",
        UnlockTrigger::Always,
        0,
    ),
    // ==================== IGNAR - FIRE ====================
    PageSpec::new(
        2,
        "IGNAR, Dragon of Fire (Part I)",
        "Before the world knew dawn, IGNAR brought light. His scales were \
         furnaces of ancient power; his breath forged the first mountains \
         from cooling magma. Mortals worshiped him as the bringer of warmth \
         and feared him as the wrath that turns paradise to ash.",
        UnlockTrigger::UsageThreshold(Element::Fire),
        5,
    ),
    PageSpec::new(
        3,
        "IGNAR, Dragon of Fire (Part II)",
        "The Burning Fragment carries IGNAR's essence: passion incarnate, \
         destruction and creation intertwined. Dragon's Wrath channels raw \
         fury into a bolt that levels forests. Misuse it, and you too shall \
         be consumed.",
        UnlockTrigger::UsageThreshold(Element::Fire),
        10,
    ),
    PageSpec::new(
        4,
        "IGNAR, Dragon of Fire (Part III)",
        "Infernal Dominion was IGNAR's final gift: a barrier of flame that \
         none can cross. Legends tell of a warrior-queen who held back ten \
         thousand with this power alone, standing unharmed at the center of \
         a battlefield turned funeral pyre.",
        UnlockTrigger::UsageThreshold(Element::Fire),
        20,
    ),
    // ==================== ZEPHRA - WIND ====================
    PageSpec::new(
        5,
        "ZEPHRA, Dragon of Wind (Part I)",
        "Where IGNAR was passion, ZEPHRA was freedom. She taught the air to \
         move, the clouds to dance, the sea to churn. Sailors prayed for her \
         favor, for she held the very breath of the world, and breath, like \
         freedom, cannot be tamed.",
        UnlockTrigger::UsageThreshold(Element::Wind),
        5,
    ),
    PageSpec::new(
        6,
        "ZEPHRA, Dragon of Wind (Part II)",
        "The Agility Fragment grants the wind's favor. Chronicles record \
         scouts who crossed continents in days, their feet barely touching \
         ground, too fast to follow and too free to catch.",
        UnlockTrigger::UsageThreshold(Element::Wind),
        10,
    ),
    PageSpec::new(
        7,
        "ZEPHRA, Dragon of Wind (Part III)",
        "Wing Burst lets the worthy soar as the dragon soared. Sky-warriors \
         rode the wind like others rode horses, striking from above and \
         vanishing into cloud. No fortress could contain them; no prison \
         hold them.",
        UnlockTrigger::UsageThreshold(Element::Wind),
        20,
    ),
    // ==================== TORVUN - EARTH ====================
    PageSpec::new(
        8,
        "TORVUN, Dragon of Earth (Part I)",
        "TORVUN stood as the unmovable object against which all things \
         broke. When gods warred across the heavens, mountains crumbled and \
         seas boiled away, but TORVUN endured. What he protected, nothing \
         could destroy.",
        UnlockTrigger::UsageThreshold(Element::Earth),
        3,
    ),
    PageSpec::new(
        9,
        "TORVUN, Dragon of Earth (Part II)",
        "Draconic Reflex channels his unbreakable defense, turning flesh \
         momentarily hard as stone. History remembers guardians who held \
         narrow passes for days, bodies covered in wounds but never falling.",
        UnlockTrigger::UsageThreshold(Element::Earth),
        10,
    ),
    PageSpec::new(
        10,
        "TORVUN, Dragon of Earth (Part III)",
        "Essence Rebirth embodies TORVUN's refusal to surrender even to \
         death. Paladins who fell protecting the innocent rose again \
         wreathed in golden light, granted his greatest blessing: the \
         strength to endure anything, forever.",
        UnlockTrigger::UsageThreshold(Element::Earth),
        20,
    ),
    // ==================== NYXAR - VOID ====================
    PageSpec::new(
        11,
        "NYXAR, Dragon of Void (Part I)",
        "NYXAR emerged from the spaces between stars. Where the others were \
         creation, he was entropy: beautiful, terrifying, inevitable. He \
         taught the world that all things must pass, and that without \
         endings there can be no transformation.",
        UnlockTrigger::UsageThreshold(Element::Void),
        3,
    ),
    PageSpec::new(
        12,
        "NYXAR, Dragon of Void (Part II)",
        "Dread Gaze channels the terror of infinite darkness. War-chronicles \
         speak in hushed tones of operatives who broke armies without \
         bloodshed, their enemies' minds shattered by visions of their own \
         dissolution.",
        UnlockTrigger::UsageThreshold(Element::Void),
        10,
    ),
    PageSpec::new(
        13,
        "NYXAR, Dragon of Void (Part III)",
        "Life Devourer converts stolen vitality into power, as NYXAR once \
         fed on dying stars. Few mastered this gift and fewer used it \
         wisely, for his final lesson remains: everything ends, even those \
         who feast on endings.",
        UnlockTrigger::UsageThreshold(Element::Void),
        20,
    ),
    // ==================== THE FALL ====================
    PageSpec::new(
        14,
        "The Fall (Part I) - Twilight of Dragons",
        "In the Age of Ending the cosmic balance failed. IGNAR's flames \
         consumed the air itself; ZEPHRA's winds tore the sky; TORVUN's \
         mountains cracked; NYXAR's void expanded. The dragons saw the \
         terrible truth: their existence was destroying the world they \
         loved.",
        UnlockTrigger::AllElementsAttuned,
        0,
    ),
    PageSpec::new(
        15,
        "The Fall (Part II) - The Great Sacrifice",
        "Rather than leave or destroy, the four chose a third path: to give \
         up their forms and scatter their power across the world as \
         fragments. The ritual took seven days and seven nights. When it \
         ended the dragons were gone, but the world endured.",
        UnlockTrigger::AllElementsAttuned,
        10,
    ),
    PageSpec::new(
        16,
        "The Fall (Part III) - Fragments Eternal",
        "Their essence endures in the fragments, each carrying not just \
         power but memory. Those who gather them inherit a legacy spanning \
         the birth of stars, carried forward by beings who loved this world \
         enough to die for it.",
        UnlockTrigger::AllElementsAttuned,
        25,
    ),
    // ==================== RECOVERY ====================
    PageSpec::new(
        17,
        "Recovery (Part I) - The Path Forward",
        "Worthiness is not measured in strength alone. The path begins with \
         lightning, teaching control and precision; from there one seeks \
         fire's passion, wind's freedom, earth's endurance, and the void's \
         mystery.",
        UnlockTrigger::AllAbilitiesMastered,
        0,
    ),
    PageSpec::new(
        18,
        "Recovery (Part II) - Masters of Dragons",
        "True mastery is not mechanical skill but understanding: knowing \
         when passion serves and when it consumes, when freedom liberates \
         and when it abandons. True masters hear the dragons' whispers in \
         their fragments.",
        UnlockTrigger::AllAbilitiesMastered,
        25,
    ),
    PageSpec::new(
        19,
        "Recovery (Part III) - Legacy Continued",
        "Master all abilities and you become a Dragon Inheritor, holding \
         the distilled essence of four cosmic beings. They gave everything \
         so the world might endure. What will you do with such gifts?",
        UnlockTrigger::AllAbilitiesMastered,
        50,
    ),
];

/// Looks up a page by ordinal.
pub fn page(ordinal: u8) -> Option<&'static PageSpec> {
    CHRONICLE.iter().find(|page| page.ordinal == ordinal)
}
