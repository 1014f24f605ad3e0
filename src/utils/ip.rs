//! 客户端 IP 提取
//!
//! 限流按客户端 IP 计数，规则：
//! - 显式配置 trusted_proxies 且连接来自其中 → 使用 X-Forwarded-For
//! - 未配置 trusted_proxies 且连接来自私有地址 → 视为反向代理，使用 X-Forwarded-For
//! - 其他情况使用连接 IP（防止伪造）

use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use tracing::debug;

use crate::config::get_config;

/// 检查 IP 是否为私有地址或 localhost
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00 // fc00::/7
                || (v6.segments()[0] & 0xffc0) == 0xfe80 // fe80::/10
        }
    }
}

fn parse_ip(ip: &str) -> Option<IpAddr> {
    ip.parse::<SocketAddr>()
        .map(|s| s.ip())
        .or_else(|_| ip.parse::<IpAddr>())
        .ok()
}

/// 检查 IP 是否在可信代理列表中（支持单 IP 与 CIDR）
pub fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    let Some(ip_addr) = parse_ip(ip) else {
        return false;
    };

    trusted_proxies.iter().any(|proxy| {
        if proxy.contains('/') {
            ip_in_cidr(&ip_addr, proxy)
        } else {
            proxy.parse::<IpAddr>().is_ok_and(|p| p == ip_addr)
        }
    })
}

/// CIDR 检查
pub fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, prefix_len)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix_len) = prefix_len.parse::<u32>() else {
        return false;
    };
    let Ok(network_addr) = network.parse::<IpAddr>() else {
        return false;
    };

    match (ip, network_addr) {
        (IpAddr::V4(ip), IpAddr::V4(net)) if prefix_len <= 32 => {
            let mask = u32::MAX.checked_shl(32 - prefix_len).unwrap_or(0);
            (u32::from(*ip) & mask) == (u32::from(net) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) if prefix_len <= 128 => {
            let mask = u128::MAX.checked_shl(128 - prefix_len).unwrap_or(0);
            (u128::from(*ip) & mask) == (u128::from(net) & mask)
        }
        _ => false,
    }
}

/// 根据连接 IP、转发头和可信代理列表决定客户端 IP
pub fn resolve_client_ip(
    peer_ip: Option<&str>,
    forwarded_ip: Option<String>,
    trusted_proxies: &[String],
) -> Option<String> {
    let Some(peer_ip) = peer_ip else {
        return forwarded_ip;
    };

    if !trusted_proxies.is_empty() {
        if is_trusted_proxy(peer_ip, trusted_proxies) {
            let real_ip = forwarded_ip.unwrap_or_else(|| peer_ip.to_string());
            debug!("Trusted proxy {} -> {}", peer_ip, real_ip);
            return Some(real_ip);
        }
        return Some(peer_ip.to_string());
    }

    if let Some(ip_addr) = parse_ip(peer_ip)
        && is_private_or_local(&ip_addr)
        && let Some(real_ip) = forwarded_ip
    {
        debug!("Private peer {} forwarded for {}", peer_ip, real_ip);
        return Some(real_ip);
    }

    Some(peer_ip.to_string())
}

/// 从 HttpRequest 提取真实客户端 IP
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    let config = get_config();
    let conn_info = req.connection_info();
    resolve_client_ip(
        conn_info.peer_addr(),
        extract_forwarded_ip_from_headers(req.headers()),
        &config.server.trusted_proxies,
    )
}

/// 从请求头提取转发的 IP（X-Forwarded-For 第一个值，其次 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(
    headers: &actix_web::http::header::HeaderMap,
) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_private_or_local() {
        assert!(is_private_or_local(&"10.0.0.1".parse().unwrap()));
        assert!(is_private_or_local(&"192.168.1.1".parse().unwrap()));
        assert!(is_private_or_local(&"127.0.0.1".parse().unwrap()));
        assert!(is_private_or_local(&"::1".parse().unwrap()));
        assert!(is_private_or_local(&"fd00::1".parse().unwrap()));
        assert!(!is_private_or_local(&"8.8.8.8".parse().unwrap()));
        assert!(!is_private_or_local(
            &"2001:4860:4860::8888".parse().unwrap()
        ));
    }

    #[test]
    fn test_ip_in_cidr() {
        let ip: IpAddr = "192.168.1.100".parse().unwrap();
        assert!(ip_in_cidr(&ip, "192.168.1.0/24"));
        assert!(!ip_in_cidr(&ip, "192.168.2.0/24"));
        assert!(ip_in_cidr(&ip, "0.0.0.0/0"));

        let ip6: IpAddr = "2001:db8::1".parse().unwrap();
        assert!(ip_in_cidr(&ip6, "2001:db8::/32"));
        assert!(!ip_in_cidr(&ip6, "192.168.0.0/16"));
    }

    #[test]
    fn test_is_trusted_proxy() {
        let proxies = vec!["127.0.0.1".to_string(), "10.1.0.0/16".to_string()];
        assert!(is_trusted_proxy("127.0.0.1", &proxies));
        assert!(is_trusted_proxy("127.0.0.1:443", &proxies));
        assert!(is_trusted_proxy("10.1.4.2", &proxies));
        assert!(!is_trusted_proxy("10.2.0.1", &proxies));
        assert!(!is_trusted_proxy("not-an-ip", &proxies));
    }

    #[test]
    fn test_resolve_public_peer_ignores_forwarded_header() {
        let ip = resolve_client_ip(Some("203.0.113.7"), Some("1.2.3.4".to_string()), &[]);
        assert_eq!(ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_resolve_private_peer_uses_forwarded_header() {
        let ip = resolve_client_ip(Some("10.0.0.5"), Some("198.51.100.2".to_string()), &[]);
        assert_eq!(ip.as_deref(), Some("198.51.100.2"));
    }

    #[test]
    fn test_resolve_explicit_proxies() {
        let proxies = vec!["10.0.0.5".to_string()];
        let trusted = resolve_client_ip(Some("10.0.0.5"), Some("198.51.100.2".to_string()), &proxies);
        assert_eq!(trusted.as_deref(), Some("198.51.100.2"));

        // 私有地址但不在显式列表中，不信任转发头
        let untrusted =
            resolve_client_ip(Some("10.0.0.6"), Some("198.51.100.2".to_string()), &proxies);
        assert_eq!(untrusted.as_deref(), Some("10.0.0.6"));
    }
}
