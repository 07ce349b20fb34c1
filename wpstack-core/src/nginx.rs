//! Reverse proxy configuration renderer.
//!
//! Renders the Nginx config that fronts a site: static files from the
//! WordPress document root, PHP handed to the PHP-FPM service over FastCGI.

use crate::site::SiteName;

/// Render the Nginx configuration for a site.
///
/// Byte-for-byte deterministic for a given name. The `phpfpm` upstream is
/// the compose service name, resolved over the site's network.
pub fn render(name: &SiteName) -> String {
    format!(
        r#"events {{}}
http {{
    server {{
        listen 80;
        server_name {name};
        root /usr/share/nginx/html;
        index index.php index.html;

        location / {{
            try_files $uri $uri/ /index.php?$is_args$args;
        }}

        location ~ \.php$ {{
            fastcgi_split_path_info ^(.+\.php)(/.+)$;
            fastcgi_pass phpfpm:9000;
            fastcgi_index index.php;
            fastcgi_param SCRIPT_FILENAME $document_root$fastcgi_script_name;
            include fastcgi_params;
        }}
    }}
}}
"#,
        name = name.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_server_name() {
        let name = SiteName::parse("blog").unwrap();
        let config = render(&name);
        assert!(config.contains("server_name blog;"));
        assert!(config.contains("fastcgi_pass phpfpm:9000;"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let name = SiteName::parse("blog").unwrap();
        assert_eq!(render(&name), render(&name));
    }

    #[test]
    fn test_render_keeps_nginx_variables_verbatim() {
        let name = SiteName::parse("blog").unwrap();
        let config = render(&name);
        assert!(config.contains("try_files $uri $uri/ /index.php?$is_args$args;"));
        assert!(config.contains("$document_root$fastcgi_script_name"));
    }
}
