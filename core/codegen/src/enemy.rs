use crate::error::{CodegenError, Result};
use crate::format::{round2, title_case, value_or};
use enml::process::parse_source;
use enml::{BlockExtractor, Diagnostics, EnmlError, Entity, Parsed, Value, normalize_block};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub const CHARACTER_KEYWORD: &str = "character";
pub const EQUIPPED_ITEM_KEYWORD: &str = "equippedItem";

/// Combined stats of everything an enemy carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStats {
    pub damage: f64,
    pub armor: f64,
    pub speed_boost: f64,
    pub jump_impulse_boost: f64,
}

impl Default for ItemStats {
    fn default() -> Self {
        Self {
            damage: 0.0,
            armor: 0.0,
            speed_boost: 1.0,
            jump_impulse_boost: 1.0,
        }
    }
}

impl ItemStats {
    /// Damage and armor add up; boosts multiply. Zero fields are ignored.
    pub fn add_item(&mut self, item: &Entity) {
        let field = |key: &str| item.get_f64(key).filter(|v| *v != 0.0);
        if let Some(v) = field("damage") {
            self.damage += v;
        }
        if let Some(v) = field("armor") {
            self.armor += v;
        }
        if let Some(v) = field("speedBoost") {
            self.speed_boost *= v;
        }
        if let Some(v) = field("jumpImpulseBoost") {
            self.jump_impulse_boost *= v;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub fields: Entity,
    pub items: ItemStats,
    /// File stem of the `.character` file the enemy came from.
    pub file_stem: String,
}

impl Enemy {
    fn number(&self, key: &str) -> f64 {
        self.fields.get_f64(key).unwrap_or(0.0)
    }

    fn text(&self, key: &str) -> String {
        self.fields.get(key).map(Value::to_string).unwrap_or_default()
    }

    pub fn resistance(&self) -> f64 {
        self.number("resistance")
    }

    pub fn speed(&self) -> f64 {
        round2(self.number("speed") * self.items.speed_boost)
    }

    pub fn jump(&self) -> f64 {
        round2(self.number("jumpImpulse") * self.items.jump_impulse_boost)
    }
}

/// Counts ids handed out so far, so that enemies sharing a file name get
/// `_2`, `_3`, ... suffixes.
#[derive(Debug, Default)]
pub struct NameCounter {
    seen: HashMap<String, usize>,
}

impl NameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count > 1 {
            format!("{base}_{count}")
        } else {
            base.to_string()
        }
    }
}

/// Enemies of one `.character` source.
///
/// Top-level `equippedItem<N>` blocks apply to every character of the file;
/// items nested inside a character block only apply to that character.
pub fn parse_enemy_source(
    text: &str,
    file_stem: &str,
    diagnostics: &mut Diagnostics,
) -> Vec<Enemy> {
    let mut characters = Vec::new();
    let mut shared_items = Vec::new();

    for block in BlockExtractor::new(text, &[CHARACTER_KEYWORD, EQUIPPED_ITEM_KEYWORD]) {
        let block = match block {
            Ok(block) => block,
            Err(EnmlError::UnterminatedBlock { identifier, line }) => {
                diagnostics.warn(
                    file_stem,
                    Some(line),
                    format!("Unterminated block '{identifier}'"),
                );
                continue;
            }
            Err(e) => {
                diagnostics.warn(file_stem, None, e.to_string());
                continue;
            }
        };
        if block.identifier.to_lowercase().starts_with(CHARACTER_KEYWORD) {
            characters.push(block);
        } else {
            let item = normalize_block(&block, file_stem, diagnostics);
            if !item.is_empty() {
                shared_items.push(item);
            }
        }
    }

    characters
        .into_iter()
        .map(|block| {
            let fields = normalize_block(&block, file_stem, diagnostics);
            let own_items =
                parse_source(&block.text(), file_stem, &[EQUIPPED_ITEM_KEYWORD], diagnostics);

            let mut items = ItemStats::default();
            for item in shared_items.iter().chain(own_items.iter()) {
                items.add_item(item);
            }
            Enemy {
                fields,
                items,
                file_stem: file_stem.to_string(),
            }
        })
        .collect()
}

pub fn parse_enemy_file(path: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Enemy>> {
    let content = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_enemy_source(&content, &stem, diagnostics))
}

/// Every enemy of the `.character` files directly inside `directories`.
///
/// Missing directories and unreadable files are reported and skipped; it is
/// an error only when none of the directories exist.
pub fn parse_enemy_dirs(directories: &[PathBuf]) -> Result<Parsed<Vec<Enemy>>> {
    let mut diagnostics = Diagnostics::new();
    let mut enemies = Vec::new();
    let mut found_any = false;

    for dir in directories {
        if !dir.is_dir() {
            diagnostics.warn(&dir.display().to_string(), None, "Enemy directory not found");
            continue;
        }
        found_any = true;

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    diagnostics.warn(&dir.display().to_string(), None, e.to_string());
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("character")
            {
                continue;
            }
            match parse_enemy_file(path, &mut diagnostics) {
                Ok(parsed) => {
                    debug!("{} enemy block(s) in {:?}", parsed.len(), path);
                    enemies.extend(parsed);
                }
                Err(e) => diagnostics.warn(
                    &path.display().to_string(),
                    None,
                    format!("Skipping unreadable file: {e}"),
                ),
            }
        }
    }

    if !found_any {
        return Err(CodegenError::NoEnemyDirectories(directories.to_vec()));
    }
    info!("Parsed {} enemies", enemies.len());
    Ok(Parsed::new(enemies, diagnostics))
}

fn sorted_by_resistance(enemies: &[Enemy]) -> Vec<&Enemy> {
    let mut sorted: Vec<&Enemy> = enemies.iter().collect();
    sorted.sort_by(|a, b| {
        a.resistance()
            .partial_cmp(&b.resistance())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// `enemyList.add(new Enemy(...));` line for one enemy.
pub fn enemy_line(enemy: &Enemy, counter: &mut NameCounter) -> String {
    let base = enemy.file_stem.to_lowercase().replace([' ', '-'], "_");
    let id = counter.next_id(&base);
    format!(
        "enemyList.add(new Enemy(str(context, R.string.enemy_{id}), {}, {}, {}, {}, {}, {}, \"{}\", \"{}\", R.drawable.enemy_{id}));",
        enemy.resistance() as i64,
        enemy.items.damage as i64,
        enemy.number("passiveDamage") as i64,
        enemy.items.armor as i64,
        Value::float(enemy.speed()),
        Value::float(enemy.jump()),
        enemy.text("patrolBehaviour"),
        enemy.text("attackBehaviour"),
    )
}

/// Multi-line description of one enemy.
pub fn enemy_description(enemy: &Enemy) -> String {
    let name = title_case(&enemy.file_stem.replace(['_', '-'], " "));
    let mut lines = vec![
        format!("Name: {name}"),
        format!("Jump Impulse: {}", Value::float(enemy.jump())),
        format!("Speed: {}", Value::float(enemy.speed())),
        format!(
            "Health (Resistance): {}",
            value_or(&enemy.fields, "resistance", Value::int(0))
        ),
        format!("Patrol Behaviour: {}", enemy.text("patrolBehaviour")),
        format!("Attack Behaviour: {}", enemy.text("attackBehaviour")),
    ];
    if let Some(touch) = enemy.fields.get("passiveDamage").filter(|v| v.is_truthy()) {
        lines.push(format!("Damage on Touch: {touch}"));
    }
    let damage = enemy.items.damage as i64;
    if damage != 0 {
        lines.push(format!("Damage (from items): {damage}"));
    }
    let armor = enemy.items.armor as i64;
    if armor != 0 {
        lines.push(format!("Armor (from items): {armor}"));
    }
    lines.join("\n")
}

/// Developer lines, weakest enemy first.
pub fn enemy_code(enemies: &[Enemy]) -> Vec<String> {
    let mut counter = NameCounter::new();
    sorted_by_resistance(enemies)
        .into_iter()
        .map(|enemy| enemy_line(enemy, &mut counter))
        .collect()
}

/// Descriptions, weakest enemy first. Entries end with a blank line.
pub fn enemy_summary(enemies: &[Enemy]) -> Vec<String> {
    sorted_by_resistance(enemies)
        .into_iter()
        .map(|enemy| format!("{}\n", enemy_description(enemy)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOBLIN: &str = r#"
equippedItem0
{
    damage = 3;
    speedBoost = 1.5;
}
character
{
    resistance = 40;
    speed = 2;
    jumpImpulse = 3.5;
    passiveDamage = 1;
    patrolBehaviour = "walk";
    attackBehaviour = "melee";
    equippedItem1
    {
        armor = 2;
        damage = 1;
    }
}
"#;

    fn goblins() -> Vec<Enemy> {
        let mut diagnostics = Diagnostics::new();
        let enemies = parse_enemy_source(GOBLIN, "cave-goblin", &mut diagnostics);
        assert!(diagnostics.is_empty());
        enemies
    }

    #[test]
    fn test_items_are_aggregated() {
        let enemies = goblins();
        assert_eq!(enemies.len(), 1);
        let goblin = &enemies[0];
        assert_eq!(goblin.items.damage, 4.0);
        assert_eq!(goblin.items.armor, 2.0);
        assert_eq!(goblin.speed(), 3.0);
        assert_eq!(goblin.jump(), 3.5);
        assert!(!goblin.fields.contains_key("armor"));
    }

    #[test]
    fn test_developer_ids_are_deduplicated() {
        let mut enemies = goblins();
        enemies.extend(goblins());
        let lines = enemy_code(&enemies);
        assert_eq!(
            lines[0],
            "enemyList.add(new Enemy(str(context, R.string.enemy_cave_goblin), 40, 4, 1, 2, 3.0, 3.5, \"walk\", \"melee\", R.drawable.enemy_cave_goblin));"
        );
        assert!(lines[1].contains("R.string.enemy_cave_goblin_2"));
    }

    #[test]
    fn test_description() {
        let enemies = goblins();
        assert_eq!(
            enemy_description(&enemies[0]),
            "Name: Cave Goblin\nJump Impulse: 3.5\nSpeed: 3.0\nHealth (Resistance): 40\nPatrol Behaviour: walk\nAttack Behaviour: melee\nDamage on Touch: 1\nDamage (from items): 4\nArmor (from items): 2"
        );
    }

    #[test]
    fn test_name_counter() {
        let mut counter = NameCounter::new();
        assert_eq!(counter.next_id("bat"), "bat");
        assert_eq!(counter.next_id("rat"), "rat");
        assert_eq!(counter.next_id("bat"), "bat_2");
    }
}
