//! Serialization and deserialization for tile types

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::tiles_types::{Tile, TileId, TileKind};

// TileKind travels as its wire code ("5m", "7z"); any parseable form is accepted back.
impl Serialize for TileKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for TileKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<TileKind>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid tile: {s}")))
    }
}

impl Serialize for TileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for TileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(TileId)
    }
}

#[derive(Serialize, Deserialize)]
struct TileRepr {
    id: TileId,
    kind: TileKind,
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        TileRepr {
            id: self.id,
            kind: self.kind,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let TileRepr { id, kind } = TileRepr::deserialize(deserializer)?;
        Ok(Tile { id, kind })
    }
}
