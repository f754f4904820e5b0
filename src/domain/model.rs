use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub climate: String,
    #[serde(default)]
    pub terrain: String,
    /// 由 retriever 在讀取時計算，不會被持久化
    #[serde(rename = "numberOfAppearancesOnMovies", default)]
    pub appearances: u32,
}

impl Planet {
    pub fn new(name: impl Into<String>, climate: impl Into<String>, terrain: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            climate: climate.into(),
            terrain: terrain.into(),
            appearances: 0,
        }
    }

    /// 清除非持久化欄位，回傳要寫入 store 的形態
    pub fn into_stored(self) -> Self {
        Self {
            appearances: 0,
            ..self
        }
    }
}
