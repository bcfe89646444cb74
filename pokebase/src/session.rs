use crate::pokemon::{self, Query};
use crate::{Error, Pokemon};

use bytes::Bytes;
use futures_util::future;

use std::sync::{Arc, LazyLock};

pub const API_URL: &str = "https://pokeapi.co/api/v2";

static CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::ClientBuilder::new()
        .build()
        .expect("Build reqwest client")
});

#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    api_url: Arc<str>,
}

impl Session {
    pub fn new(api_url: impl AsRef<str>) -> Self {
        let api_url = api_url.as_ref().trim_end_matches('/');

        log::info!("PokéAPI session started ({api_url})");

        Self {
            client: CLIENT.clone(),
            api_url: Arc::from(api_url),
        }
    }

    /// Fetches a single record with one `GET /pokemon/{query}`.
    ///
    /// Records fetched by id must carry the requested id.
    pub async fn fetch_pokemon(&self, query: impl Into<Query>) -> Result<Pokemon, Error> {
        let query = query.into();
        let url = format!("{api_url}/pokemon/{query}", api_url = self.api_url);

        log::info!("Fetching Pokémon: {url}");
        let body = self.get(&url).await?;
        let pokemon = Pokemon::parse(&body)?;

        match query {
            Query::Id(id) if pokemon.id != id => Err(Error::InvalidRecord(format!(
                "requested pokémon #{id}, received #{received}",
                received = pokemon.id
            ))),
            _ => Ok(pokemon),
        }
    }

    /// Fetches every id concurrently and waits for all of them to settle.
    ///
    /// The records keep the order of `ids`. Any failure fails the batch.
    pub async fn fetch_batch(&self, ids: &[pokemon::Id]) -> Result<Vec<Pokemon>, Error> {
        let results = future::join_all(ids.iter().map(|&id| self.fetch_pokemon(id))).await;

        results.into_iter().collect()
    }

    pub async fn download_sprite(&self, url: &str) -> Result<Bytes, Error> {
        log::info!("Downloading sprite: {url}");

        self.get(url).await
    }

    async fn get(&self, url: &str) -> Result<Bytes, Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                text: status.canonical_reason().unwrap_or("Unknown").to_owned(),
            });
        }

        Ok(response.bytes().await?)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn record(id: u32, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "height": 4,
            "weight": 60,
            "types": [{ "slot": 1, "type": { "name": "electric", "url": "" } }],
            "abilities": [],
            "stats": [{ "base_stat": 90, "effort": 2, "stat": { "name": "speed", "url": "" } }],
            "sprites": { "front_default": format!("https://sprites.test/{id}.png") }
        })
    }

    /// Answers `/pokemon/{id}` with a record carrying that id.
    struct Echo;

    impl Respond for Echo {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let id: u32 = request
                .url
                .path()
                .rsplit('/')
                .next()
                .and_then(|id| id.parse().ok())
                .unwrap_or_default();

            ResponseTemplate::new(200).set_body_json(record(id, &format!("pokemon-{id}")))
        }
    }

    fn ids(ids: impl IntoIterator<Item = u32>) -> Vec<pokemon::Id> {
        ids.into_iter()
            .map(|id| pokemon::Id::new(id).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn fetches_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon/25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record(25, "pikachu")))
            .expect(1)
            .mount(&server)
            .await;

        let session = Session::new(server.uri());
        let pokemon = session
            .fetch_pokemon(pokemon::Id::new(25).unwrap())
            .await
            .unwrap();

        assert_eq!(pokemon.id.get(), 25);
        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(
            pokemon.sprites.front_default(),
            Some("https://sprites.test/25.png")
        );
    }

    #[tokio::test]
    async fn fetches_by_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record(25, "pikachu")))
            .mount(&server)
            .await;

        let session = Session::new(format!("{}/", server.uri()));
        let pokemon = session
            .fetch_pokemon(Query::parse("Pikachu").unwrap())
            .await
            .unwrap();

        assert_eq!(pokemon.id.get(), 25);
    }

    #[tokio::test]
    async fn names_are_validated_before_any_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record(25, "pikachu")))
            .mount(&server)
            .await;

        let session = Session::new(server.uri());

        for invalid in ["", "   ", "0", "pika/chu", "../berry"] {
            assert!(matches!(Query::parse(invalid), Err(Error::InvalidQuery(_))));
        }

        let pokemon = session
            .fetch_pokemon(Query::parse("PIKACHU").unwrap())
            .await
            .unwrap();
        assert_eq!(pokemon.name, "pikachu");

        let requests = server.received_requests().await.unwrap();
        let paths: Vec<_> = requests.iter().map(|request| request.url.path()).collect();
        assert_eq!(paths, ["/pokemon/pikachu"]);
    }

    #[tokio::test]
    async fn non_success_status_carries_status_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let session = Session::new(server.uri());
        let error = session
            .fetch_pokemon(pokemon::Id::new(9999).unwrap())
            .await
            .unwrap_err();

        match error {
            Error::Status { status, text } => {
                assert_eq!(status, 404);
                assert_eq!(text, "Not Found");
            }
            error => panic!("unexpected error: {error}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ \"id\": 1 "))
            .mount(&server)
            .await;

        let session = Session::new(server.uri());
        let error = session
            .fetch_pokemon(pokemon::Id::new(1).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::InvalidBody(_)));
    }

    #[tokio::test]
    async fn mismatched_id_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(record(26, "raichu")))
            .mount(&server)
            .await;

        let session = Session::new(server.uri());
        let error = session
            .fetch_pokemon(pokemon::Id::new(25).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(error, Error::InvalidRecord(_)));
    }

    #[tokio::test]
    async fn batch_keeps_dispatch_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/pokemon/\d+$"))
            .respond_with(Echo)
            .expect(10)
            .mount(&server)
            .await;

        let session = Session::new(server.uri());
        let requested = ids([7, 3, 999, 3, 1, 1000, 42, 8, 150, 25]);
        let pokemons = session.fetch_batch(&requested).await.unwrap();

        let received: Vec<_> = pokemons.iter().map(|pokemon| pokemon.id).collect();
        assert_eq!(received, requested);
    }

    #[tokio::test]
    async fn batch_fails_as_a_whole_after_every_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pokemon/13"))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/pokemon/\d+$"))
            .respond_with(Echo)
            .mount(&server)
            .await;

        let session = Session::new(server.uri());
        let result = session
            .fetch_batch(&ids([1, 2, 3, 4, 13, 6, 7, 8, 9, 10]))
            .await;

        assert!(matches!(result, Err(Error::Status { status: 500, .. })));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 10);
    }

    #[tokio::test]
    async fn downloads_sprites() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sprites/25.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
            .mount(&server)
            .await;

        let session = Session::new(server.uri());
        let bytes = session
            .download_sprite(&format!("{}/sprites/25.png", server.uri()))
            .await
            .unwrap();

        assert_eq!(bytes.as_ref(), &[1, 2, 3]);
    }
}
