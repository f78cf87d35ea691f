// Tick and timing
pub const BATTLE_TICK_INTERVAL_MS: u64 = 1000;
pub const UI_REFRESH_INTERVAL_MS: u64 = 500;
pub const MILLIS_PER_SECOND: i64 = 1000;

// Starting character
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_MAX_HP: i32 = 100;
pub const STARTING_ATTACK: i32 = 10;
pub const STARTING_DEFENSE: i32 = 5;
pub const STARTING_GOLD: u64 = 0;

// XP and leveling
pub const XP_PER_LEVEL: u64 = 100;
pub const LEVEL_UP_MAX_HP: i32 = 20;
pub const LEVEL_UP_ATTACK: i32 = 2;
pub const LEVEL_UP_DEFENSE: i32 = 1;

// Combat
pub const MIN_DAMAGE: i32 = 1;
pub const KILL_HEAL_AMOUNT: i32 = 2;
pub const DEATH_HP_FLOOR: i32 = 1;

// Locations
pub const DEFAULT_LOCATION: &str = "main-city";
pub const TRAINING_GROUND_PREFIX: &str = "training-ground-";
pub const LEGACY_TRAINING_GROUND_PREFIX: &str = "trainingGround";
pub const NUM_TRAINING_GROUNDS: u32 = 5;

// Monster templates: (name, level, hp, attack, defense, exp_reward, gold_reward)
// Index 0 = tier 1
pub const MONSTER_TEMPLATES: [(&str, u32, i32, i32, i32, u64, u64); 5] = [
    ("Slime", 1, 30, 8, 2, 10, 5),
    ("Goblin", 3, 60, 15, 5, 25, 15),
    ("Orc", 5, 120, 25, 10, 50, 30),
    ("Troll", 8, 200, 40, 15, 100, 60),
    ("Dragon", 12, 350, 60, 25, 200, 120),
];

// Shop catalogs: (name, bonus, price)
pub const WEAPON_CATALOG: [(&str, i32, u64); 5] = [
    ("Iron Sword", 10, 100),
    ("Steel Sword", 25, 500),
    ("Silver Sword", 50, 2000),
    ("Golden Sword", 100, 10000),
    ("Divine Sword", 200, 50000),
];

pub const ARMOR_CATALOG: [(&str, i32, u64); 5] = [
    ("Cloth Tunic", 5, 50),
    ("Leather Armor", 15, 300),
    ("Chain Mail", 30, 1500),
    ("Plate Armor", 60, 8000),
    ("Divine Armor", 120, 40000),
];

// Presentation
pub const COMBAT_LOG_CAPACITY: usize = 10;
pub const POTION_BUNDLE_SIZE: u32 = 10;

// Save file
pub const SAVE_VERSION_MAGIC: u64 = 0x4D4D_4F52_5047_0001;
