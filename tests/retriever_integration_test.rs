use anyhow::Result;
use httpmock::prelude::*;
use stars::domain::ports::PlanetRepository;
use stars::{Context, InMemoryPlanetStore, Planet, PlanetRetriever, StarsError, SwapiCounter};
use std::sync::Arc;
use std::time::Duration;

fn swapi_planet(name: &str, films: usize) -> serde_json::Value {
    let films: Vec<String> = (1..=films)
        .map(|i| format!("https://swapi.dev/api/films/{}/", i))
        .collect();
    serde_json::json!({ "name": name, "films": films })
}

fn mock_search(server: &MockServer, query: &str, results: Vec<serde_json::Value>) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/planets/")
            .query_param("search", query);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "count": results.len(),
                "next": null,
                "previous": null,
                "results": results
            }));
    });
}

async fn seeded_store(names: &[&str]) -> Result<Arc<InMemoryPlanetStore>> {
    let store = Arc::new(InMemoryPlanetStore::new());
    let ctx = Context::background();
    for name in names {
        store
            .create(&ctx, Planet::new(*name, "temperate", "mountains"))
            .await?;
    }
    Ok(store)
}

fn retriever(store: Arc<InMemoryPlanetStore>, counter: SwapiCounter) -> PlanetRetriever {
    PlanetRetriever::new(store, Arc::new(counter))
}

#[tokio::test]
async fn test_retrieve_by_name_with_swapi() -> Result<()> {
    let server = MockServer::start();
    mock_search(&server, "Tatooine", vec![swapi_planet("Tatooine", 5)]);

    let store = seeded_store(&["Tatooine"]).await?;
    let retriever = retriever(store, SwapiCounter::new(server.base_url()));

    let planet = retriever
        .retrieve_by_name(&Context::background(), "Tatooine")
        .await?;

    assert_eq!(planet.name, "Tatooine");
    assert_eq!(planet.appearances, 5);
    Ok(())
}

#[tokio::test]
async fn test_unknown_planet_on_swapi_counts_zero() -> Result<()> {
    let server = MockServer::start();
    mock_search(&server, "Pluto", vec![]);
    // 搜尋 "Yavin" 會同時回傳 "Yavin IV"，只能取完全相符的那筆
    mock_search(
        &server,
        "Yavin",
        vec![swapi_planet("Yavin IV", 2), swapi_planet("Yavin", 1)],
    );

    let store = seeded_store(&["Pluto", "Yavin"]).await?;
    let retriever = retriever(store, SwapiCounter::new(server.base_url()));
    let ctx = Context::background();

    assert_eq!(retriever.retrieve_by_name(&ctx, "Pluto").await?.appearances, 0);
    assert_eq!(retriever.retrieve_by_name(&ctx, "Yavin").await?.appearances, 1);
    Ok(())
}

#[tokio::test]
async fn test_retrieve_all_with_one_failing_lookup() -> Result<()> {
    let server = MockServer::start();
    mock_search(&server, "Alderaan", vec![swapi_planet("Alderaan", 2)]);
    mock_search(&server, "Naboo", vec![swapi_planet("Naboo", 4)]);
    server.mock(|when, then| {
        when.method(GET)
            .path("/planets/")
            .query_param("search", "Bespin");
        then.status(500);
    });

    let store = seeded_store(&["Alderaan", "Bespin", "Naboo"]).await?;
    let retriever = retriever(store, SwapiCounter::new(server.base_url()));

    let planets = retriever.retrieve_all(&Context::background()).await?;

    let got: Vec<(&str, u32)> = planets
        .iter()
        .map(|p| (p.name.as_str(), p.appearances))
        .collect();
    assert_eq!(got, vec![("Alderaan", 2), ("Bespin", 0), ("Naboo", 4)]);
    Ok(())
}

#[tokio::test]
async fn test_retrieve_all_large_batch_hits_counter_once_per_planet() -> Result<()> {
    let server = MockServer::start();
    let names: Vec<String> = (0..23).map(|i| format!("Planet {}", i)).collect();
    let search = server.mock(|when, then| {
        when.method(GET).path("/planets/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "results": [] }));
    });

    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let store = seeded_store(&refs).await?;
    let retriever = retriever(store, SwapiCounter::new(server.base_url()));

    let planets = retriever.retrieve_all(&Context::background()).await?;

    search.assert_hits(23);
    let returned: Vec<&str> = planets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(returned, refs);
    Ok(())
}

#[tokio::test]
async fn test_empty_store_never_calls_swapi() -> Result<()> {
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(GET).path("/planets/");
        then.status(200).json_body(serde_json::json!({ "results": [] }));
    });

    let store = seeded_store(&[]).await?;
    let retriever = retriever(store, SwapiCounter::new(server.base_url()));

    let planets = retriever.retrieve_all(&Context::background()).await?;

    assert!(planets.is_empty());
    search.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_missing_planet_never_calls_swapi() -> Result<()> {
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(GET).path("/planets/");
        then.status(200).json_body(serde_json::json!({ "results": [] }));
    });

    let store = seeded_store(&["Tatooine"]).await?;
    let retriever = retriever(store, SwapiCounter::new(server.base_url()));
    let ctx = Context::background();

    let by_name = retriever.retrieve_by_name(&ctx, "Kamino").await;
    assert!(matches!(by_name, Err(StarsError::NotFound { .. })));

    let by_id = retriever
        .retrieve_by_id(&ctx, "507f1f77bcf86cd799439011")
        .await;
    assert!(matches!(by_id, Err(StarsError::NotFound { .. })));

    let bad_id = retriever.retrieve_by_id(&ctx, "not-an-id").await;
    assert!(matches!(bad_id, Err(StarsError::InvalidIdentifier { .. })));

    search.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_slow_swapi_respects_deadline() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/planets/");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({ "results": [] }));
    });

    let store = seeded_store(&["Dagobah", "Mustafar"]).await?;
    let retriever = retriever(store, SwapiCounter::new(server.base_url()));
    let ctx = Context::background().with_timeout(Duration::from_millis(200));

    let started = std::time::Instant::now();
    let planets = retriever.retrieve_all(&ctx).await?;
    assert_eq!(planets.len(), 2);
    assert!(planets.iter().all(|p| p.appearances == 0));
    assert!(started.elapsed() < Duration::from_secs(2));

    // 新的 context：store 查得到，SWAPI 回應前 deadline 到期
    let fresh = Context::background().with_timeout(Duration::from_millis(200));
    let started = std::time::Instant::now();
    let single = retriever.retrieve_by_name(&fresh, "Dagobah").await;
    assert!(matches!(single, Err(StarsError::DeadlineExceeded)));
    assert!(started.elapsed() >= Duration::from_millis(150));
    assert!(started.elapsed() < Duration::from_secs(2));
    Ok(())
}
