//! # pmospotify - Client Spotify pour PMOPodcast
//!
//! Cette crate fournit un client Rust minimal pour l'API Web Spotify, limité
//! à ce dont PMOPodcast a besoin :
//! - Authentification par le flux OAuth2 *client credentials*
//! - Lecture des informations d'un show (podcast)
//! - Lecture des épisodes d'un show, du plus récent au plus ancien
//!
//! ## Architecture
//!
//! - `SpotifyClient` : client haut-niveau, gère la durée de vie du token
//! - `api` : couche d'accès à l'API REST (token, shows, épisodes)
//! - `models` : structures de données (Show, Episode, EpisodePage)
//! - `config_ext` : credentials dans `pmoconfig` (section `accounts.spotify`)
//!
//! ## Utilisation
//!
//! ```rust,no_run
//! use pmoconfig::Config;
//! use pmospotify::SpotifyClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_config("")?;
//!     let client = SpotifyClient::from_config_obj(&config)?;
//!
//!     let show = client.get_show("0onVY7weTsqjZLM8y3Tt9A").await?;
//!     println!("{} by {}", show.name, show.publisher);
//!     Ok(())
//! }
//! ```
//!
//! ## Gestion des erreurs
//!
//! Les erreurs sont typées par [`SpotifyError`]. Aucune requête n'est
//! rejouée automatiquement, y compris en cas de rate limiting.

pub mod api;
pub mod client;
pub mod config_ext;
pub mod error;
pub mod models;

pub use client::{ClientBuilder, SpotifyClient};
pub use config_ext::SpotifyConfigExt;
pub use error::{Result, SpotifyError};
pub use models::{AccessToken, Episode, EpisodePage, Show};
