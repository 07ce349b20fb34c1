//! Integration tests for the site materialization lifecycle.
//!
//! These tests exercise the full on-disk lifecycle:
//! - Create (materialize) a site
//! - Re-create idempotently
//! - Run a second site alongside it
//! - Delete the site
//!
//! The external orchestrator is not invoked; its integration is covered by
//! the orchestrator module's own tests.

use std::path::Path;
use tempfile::TempDir;
use wpstack_core::compose::ComposeFile;
use wpstack_core::{Config, Materializer, SiteName, WpstackError};

fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.sites_dir = root.join("sites").to_string_lossy().to_string();
    config
}

#[test]
fn create_then_delete_leaves_no_residue() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let materializer = Materializer::new(&config);

    let name = SiteName::parse("blog").unwrap();
    let site = materializer.materialize(&name).unwrap();
    assert!(site.root.is_dir());

    materializer.remove(&name).unwrap();
    assert!(!site.root.exists());

    // The sites root survives, empty of this site.
    assert!(config.sites_dir().is_dir());
}

#[test]
fn two_sites_coexist_without_collisions() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let materializer = Materializer::new(&config);

    let blog = materializer.materialize(&SiteName::parse("blog").unwrap()).unwrap();
    let shop = materializer.materialize(&SiteName::parse("shop").unwrap()).unwrap();

    // Distinct directories and port blocks.
    assert_ne!(blog.root, shop.root);
    assert_ne!(blog.ports.wordpress, shop.ports.wordpress);
    assert_ne!(blog.ports.proxy, shop.ports.proxy);

    // The generated compose files publish disjoint host ports and use
    // name-prefixed networks and volumes.
    let blog_compose: ComposeFile =
        serde_yaml::from_str(&std::fs::read_to_string(blog.compose_path()).unwrap()).unwrap();
    let shop_compose: ComposeFile =
        serde_yaml::from_str(&std::fs::read_to_string(shop.compose_path()).unwrap()).unwrap();

    let host_ports = |compose: &ComposeFile| -> Vec<String> {
        compose
            .services
            .values()
            .flat_map(|s| s.ports.iter())
            .map(|mapping| mapping.split(':').next().unwrap().to_string())
            .collect()
    };
    for port in host_ports(&blog_compose) {
        assert!(
            !host_ports(&shop_compose).contains(&port),
            "host port {} published by both sites",
            port
        );
    }

    assert!(blog_compose.networks.contains_key("blog_wpsite"));
    assert!(shop_compose.networks.contains_key("shop_wpsite"));
    assert!(blog_compose.volumes.contains_key("blog_db_data"));
    assert!(shop_compose.volumes.contains_key("shop_db_data"));
}

#[test]
fn recreate_keeps_existing_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let materializer = Materializer::new(&config);

    let name = SiteName::parse("blog").unwrap();
    let site = materializer.materialize(&name).unwrap();

    let compose = std::fs::read_to_string(site.compose_path()).unwrap();
    let nginx = std::fs::read_to_string(site.nginx_config_path()).unwrap();

    let again = materializer.materialize(&name).unwrap();
    assert_eq!(site.ports, again.ports);
    assert_eq!(compose, std::fs::read_to_string(again.compose_path()).unwrap());
    assert_eq!(nginx, std::fs::read_to_string(again.nginx_config_path()).unwrap());
}

#[test]
fn generated_compose_matches_expected_topology() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let materializer = Materializer::new(&config);

    let site = materializer.materialize(&SiteName::parse("blog").unwrap()).unwrap();
    let compose: ComposeFile =
        serde_yaml::from_str(&std::fs::read_to_string(site.compose_path()).unwrap()).unwrap();

    assert_eq!(compose.services.len(), 5);
    for service in ["db", "phpfpm", "phpmyadmin", "wordpress", "proxy"] {
        assert!(compose.services.contains_key(service), "missing service {}", service);
    }

    // The database is reachable only over the site network.
    assert!(compose.services["db"].ports.is_empty());

    // The proxy waits for everything else.
    let proxy = &compose.services["proxy"];
    assert_eq!(proxy.depends_on.len(), 4);

    // The nginx config is mounted into the proxy.
    assert!(proxy
        .volumes
        .iter()
        .any(|v| v == "./nginx/default.conf:/etc/nginx/nginx.conf"));
}

#[test]
fn invalid_names_never_touch_the_filesystem() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    for raw in ["Blog", "../escape", "my site"] {
        assert!(matches!(
            SiteName::parse(raw),
            Err(WpstackError::InvalidSiteName { .. })
        ));
    }

    // Nothing was created under the sites root.
    assert!(!config.sites_dir().exists());
}
