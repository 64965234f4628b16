use std::path::Path;

use anyhow::{Context, Result};
use confcal_core::source::Source;
use confcal_core::{Config, RoomInfo};

pub async fn run(config_path: Option<&Path>, source: Option<String>) -> Result<()> {
    let mut config = Config::load_or_default(config_path).context("Failed to load config")?;
    if let Some(source) = source {
        config.source = source;
    }

    let source = Source::parse(&config.source);
    let agenda = confcal_core::load_agenda(&config)
        .await
        .with_context(|| format!("Failed to load agenda from {}", source))?;

    let rooms = agenda.room_listing();
    if rooms.is_empty() {
        println!("No rooms in {}", source);
        return Ok(());
    }

    for room in &rooms {
        println!("{}", format_room(room));
    }

    Ok(())
}

fn format_room(room: &RoomInfo) -> String {
    match room.capacity {
        Some(capacity) => format!("{:>6}  {}  🪑 {}", room.id, room.name, capacity),
        None => format!("{:>6}  {}", room.id, room.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_room() {
        let room = RoomInfo {
            id: "3".to_string(),
            name: "Hall C".to_string(),
            capacity: Some(80),
        };
        assert_eq!(format_room(&room), "     3  Hall C  🪑 80");

        let room = RoomInfo {
            capacity: None,
            ..room
        };
        assert_eq!(format_room(&room), "     3  Hall C");
    }
}
