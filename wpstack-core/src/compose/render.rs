//! Compose topology renderer for WordPress sites.
//!
//! Builds the fixed five-service topology (database, PHP-FPM, phpMyAdmin,
//! WordPress, reverse proxy) for a site, substituting the site name into
//! host ports, volume paths, and network/container names so that any number
//! of sites can coexist on one host.

use super::types::{ComposeFile, NetworkDefinition, Service, VolumeDefinition};
use crate::config::Config;
use crate::error::{Result, WpstackError};
use crate::site::Site;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Compose file format version emitted by the renderer.
const COMPOSE_VERSION: &str = "3";

const MYSQL_IMAGE: &str = "mysql:5.7";
const PHPFPM_IMAGE: &str = "php:fpm";
const PHPMYADMIN_IMAGE: &str = "phpmyadmin/phpmyadmin";
const WORDPRESS_IMAGE: &str = "wordpress:latest";
const NGINX_IMAGE: &str = "nginx:1.17.10";

/// Renderer for per-site docker-compose files.
pub struct ComposeRenderer;

impl ComposeRenderer {
    /// Build the compose topology for a site.
    ///
    /// Deterministic for a given site (name and ports) and configuration.
    #[instrument(skip(site, config), fields(site = %site.name))]
    pub fn render(site: &Site, config: &Config) -> ComposeFile {
        debug!("Rendering compose topology");

        let name = &site.name;
        let network = name.network_name();
        let volume = name.volume_name();

        let mut services = BTreeMap::new();

        services.insert(
            "db".to_string(),
            Service {
                image: MYSQL_IMAGE.to_string(),
                container_name: Some(name.container_name("db")),
                restart: Some("always".to_string()),
                environment: env_map(&[
                    ("MYSQL_DATABASE", &config.db_name),
                    ("MYSQL_USER", &config.db_user),
                    ("MYSQL_PASSWORD", &config.db_password),
                    ("MYSQL_ROOT_PASSWORD", &config.db_root_password),
                ]),
                volumes: vec![format!("{}:/var/lib/mysql", volume)],
                networks: vec![network.clone()],
                ..Default::default()
            },
        );

        services.insert(
            "phpfpm".to_string(),
            Service {
                image: PHPFPM_IMAGE.to_string(),
                container_name: Some(name.container_name("phpfpm")),
                depends_on: vec!["db".to_string()],
                ports: vec![format!("{}:9000", site.ports.phpfpm)],
                volumes: vec!["./public:/usr/share/nginx/html".to_string()],
                networks: vec![network.clone()],
                ..Default::default()
            },
        );

        services.insert(
            "phpmyadmin".to_string(),
            Service {
                image: PHPMYADMIN_IMAGE.to_string(),
                container_name: Some(name.container_name("phpmyadmin")),
                restart: Some("always".to_string()),
                depends_on: vec!["db".to_string()],
                ports: vec![format!("{}:80", site.ports.phpmyadmin)],
                environment: env_map(&[
                    ("PMA_HOST", "db"),
                    ("MYSQL_ROOT_PASSWORD", &config.db_root_password),
                ]),
                networks: vec![network.clone()],
                ..Default::default()
            },
        );

        services.insert(
            "wordpress".to_string(),
            Service {
                image: WORDPRESS_IMAGE.to_string(),
                container_name: Some(name.container_name("wordpress")),
                restart: Some("always".to_string()),
                depends_on: vec!["db".to_string()],
                ports: vec![format!("{}:80", site.ports.wordpress)],
                volumes: vec!["./:/var/www/html".to_string()],
                environment: env_map(&[
                    ("WORDPRESS_DB_HOST", "db:3306"),
                    ("WORDPRESS_DB_USER", &config.db_user),
                    ("WORDPRESS_DB_PASSWORD", &config.db_password),
                    ("WORDPRESS_DB_NAME", &config.db_name),
                ]),
                networks: vec![network.clone()],
                ..Default::default()
            },
        );

        services.insert(
            "proxy".to_string(),
            Service {
                image: NGINX_IMAGE.to_string(),
                container_name: Some(name.container_name("proxy")),
                depends_on: vec![
                    "db".to_string(),
                    "wordpress".to_string(),
                    "phpmyadmin".to_string(),
                    "phpfpm".to_string(),
                ],
                ports: vec![format!("{}:80", site.ports.proxy)],
                volumes: vec![
                    "./:/var/www/html".to_string(),
                    "./nginx/default.conf:/etc/nginx/nginx.conf".to_string(),
                ],
                networks: vec![network.clone()],
                ..Default::default()
            },
        );

        let mut volumes = BTreeMap::new();
        volumes.insert(volume, VolumeDefinition::default());

        let mut networks = BTreeMap::new();
        networks.insert(network, NetworkDefinition::default());

        ComposeFile { version: COMPOSE_VERSION.to_string(), services, volumes, networks }
    }

    /// Render the compose topology for a site as YAML.
    pub fn render_yaml(site: &Site, config: &Config) -> Result<String> {
        serde_yaml::to_string(&Self::render(site, config)).map_err(|e| {
            WpstackError::RenderFailed {
                artifact: "docker-compose.yml".to_string(),
                reason: e.to_string(),
            }
        })
    }
}

fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
