use crate::core::context::Context;
use crate::domain::model::Planet;
use crate::domain::ports::{PlanetFinder, PlanetRepository};
use crate::utils::error::{Result, StarsError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

static ID_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// 產生 24 字元的 hex id (秒 + 奈秒 + 序號)
fn new_object_id() -> String {
    let now = chrono::Utc::now();
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{:08x}{:08x}{:08x}",
        now.timestamp() as u32,
        now.timestamp_subsec_nanos(),
        seq
    )
}

/// 檢查 id 格式並轉成小寫
pub fn parse_object_id(id: &str) -> Result<String> {
    if id.len() != 24 {
        return Err(StarsError::InvalidIdentifier {
            id: id.to_string(),
            reason: "must be 24 hexadecimal characters".to_string(),
        });
    }
    if let Some(bad) = id.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(StarsError::InvalidIdentifier {
            id: id.to_string(),
            reason: format!("invalid character '{}'", bad),
        });
    }
    Ok(id.to_ascii_lowercase())
}

/// 行星 store：記憶體內保存，可選擇同步寫入 JSON 檔案。
///
/// `find_all` 依插入順序回傳。
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanetStore {
    planets: Arc<RwLock<Vec<Planet>>>,
    snapshot_path: Option<PathBuf>,
}

impl InMemoryPlanetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 開啟檔案型 store，檔案不存在時從空白開始
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let planets = match tokio::fs::read(&path).await {
            Ok(data) if data.is_empty() => Vec::new(),
            Ok(data) => serde_json::from_slice::<Vec<Planet>>(&data).map_err(|e| {
                StarsError::StoreError {
                    message: format!("cannot parse {}: {}", path.display(), e),
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(StarsError::StoreError {
                    message: format!("cannot read {}: {}", path.display(), e),
                })
            }
        };

        tracing::info!("📂 Loaded {} planets from {}", planets.len(), path.display());

        Ok(Self {
            planets: Arc::new(RwLock::new(
                planets.into_iter().map(Planet::into_stored).collect(),
            )),
            snapshot_path: Some(path),
        })
    }

    async fn persist(&self, planets: &[Planet]) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let data = serde_json::to_vec_pretty(planets)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StarsError::StoreError {
                    message: format!("cannot create {}: {}", parent.display(), e),
                })?;
        }
        tokio::fs::write(path, data)
            .await
            .map_err(|e| StarsError::StoreError {
                message: format!("cannot write {}: {}", path.display(), e),
            })?;

        tracing::debug!("Persisted {} planets to {}", planets.len(), path.display());
        Ok(())
    }

    fn ensure_unique_name(planets: &[Planet], name: &str, except_id: Option<&str>) -> Result<()> {
        let taken = planets
            .iter()
            .any(|p| p.name == name && Some(p.id.as_str()) != except_id);
        if taken {
            return Err(StarsError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PlanetFinder for InMemoryPlanetStore {
    async fn find_by_id(&self, ctx: &Context, id: &str) -> Result<Planet> {
        ctx.check()?;
        let id = parse_object_id(id)?;
        let planets = self.planets.read().await;
        planets
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StarsError::NotFound {
                what: format!("id {}", id),
            })
    }

    async fn find_by_name(&self, ctx: &Context, name: &str) -> Result<Planet> {
        ctx.check()?;
        let planets = self.planets.read().await;
        planets
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| StarsError::NotFound {
                what: format!("name {}", name),
            })
    }

    async fn find_all(&self, ctx: &Context) -> Result<Vec<Planet>> {
        ctx.check()?;
        let planets = self.planets.read().await;
        Ok(planets.clone())
    }
}

#[async_trait]
impl PlanetRepository for InMemoryPlanetStore {
    async fn create(&self, ctx: &Context, planet: Planet) -> Result<Planet> {
        ctx.check()?;
        let mut planets = self.planets.write().await;
        Self::ensure_unique_name(&planets, &planet.name, None)?;

        let mut id = new_object_id();
        while planets.iter().any(|p| p.id == id) {
            id = new_object_id();
        }
        let stored = Planet {
            id,
            ..planet.into_stored()
        };

        // 先寫檔成功才更新記憶體
        let mut next = planets.clone();
        next.push(stored.clone());
        self.persist(&next).await?;
        *planets = next;

        tracing::info!("🪐 Created planet '{}' ({})", stored.name, stored.id);
        Ok(stored)
    }

    async fn update(&self, ctx: &Context, planet: Planet) -> Result<Planet> {
        ctx.check()?;
        let id = parse_object_id(&planet.id)?;
        let mut planets = self.planets.write().await;
        Self::ensure_unique_name(&planets, &planet.name, Some(id.as_str()))?;

        let stored = Planet {
            id: id.clone(),
            ..planet.into_stored()
        };

        let mut next = planets.clone();
        match next.iter_mut().find(|p| p.id == id) {
            Some(existing) => *existing = stored.clone(),
            None => {
                tracing::debug!("No planet with id {}, inserting", id);
                next.push(stored.clone());
            }
        }
        self.persist(&next).await?;
        *planets = next;

        tracing::info!("🪐 Saved planet '{}' ({})", stored.name, stored.id);
        Ok(stored)
    }

    async fn delete(&self, ctx: &Context, id: &str) -> Result<()> {
        ctx.check()?;
        let id = parse_object_id(id)?;
        let mut planets = self.planets.write().await;

        let Some(position) = planets.iter().position(|p| p.id == id) else {
            return Err(StarsError::NotFound {
                what: format!("id {}", id),
            });
        };

        let mut next = planets.clone();
        let removed = next.remove(position);
        self.persist(&next).await?;
        *planets = next;

        tracing::info!("🗑️ Deleted planet '{}' ({})", removed.name, removed.id);
        Ok(())
    }
}
