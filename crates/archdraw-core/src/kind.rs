//! Node catalog.
//!
//! Every node carries a [`NodeKind`] that only influences how it is drawn. Kinds are grouped by
//! provider and category the same way cloud icon sets are (`gcp.network.dns`), and each kind maps
//! to a Graphviz shape/color pair in place of an icon image.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gcp,
    Generic,
    OnPrem,
    K8s,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gcp => "gcp",
            Self::Generic => "generic",
            Self::OnPrem => "onprem",
            Self::K8s => "k8s",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // gcp
    KubernetesEngine,
    Iap,
    LoadBalancing,
    Dns,
    Vpc,
    Cdn,
    Sql,
    Build,
    ContainerRegistry,
    // generic
    Mobile,
    Blank,
    // onprem
    Git,
    // k8s
    Deployment,
}

/// Graphviz presentation of a [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: &'static str,
    pub fillcolor: &'static str,
    pub color: &'static str,
}

const GCP_BLUE: &str = "#4285F4";
const K8S_BLUE: &str = "#326CE5";
const NEUTRAL: &str = "#7B8894";

impl NodeKind {
    pub const ALL: [NodeKind; 13] = [
        Self::KubernetesEngine,
        Self::Iap,
        Self::LoadBalancing,
        Self::Dns,
        Self::Vpc,
        Self::Cdn,
        Self::Sql,
        Self::Build,
        Self::ContainerRegistry,
        Self::Mobile,
        Self::Blank,
        Self::Git,
        Self::Deployment,
    ];

    pub fn provider(self) -> Provider {
        match self {
            Self::KubernetesEngine
            | Self::Iap
            | Self::LoadBalancing
            | Self::Dns
            | Self::Vpc
            | Self::Cdn
            | Self::Sql
            | Self::Build
            | Self::ContainerRegistry => Provider::Gcp,
            Self::Mobile | Self::Blank => Provider::Generic,
            Self::Git => Provider::OnPrem,
            Self::Deployment => Provider::K8s,
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            Self::KubernetesEngine | Self::Deployment => "compute",
            Self::Iap => "security",
            Self::LoadBalancing | Self::Dns | Self::Vpc | Self::Cdn => "network",
            Self::Sql => "database",
            Self::Build | Self::ContainerRegistry => "devtools",
            Self::Mobile => "device",
            Self::Blank => "blank",
            Self::Git => "vcs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::KubernetesEngine => "kubernetes_engine",
            Self::Iap => "iap",
            Self::LoadBalancing => "load_balancing",
            Self::Dns => "dns",
            Self::Vpc => "vpc",
            Self::Cdn => "cdn",
            Self::Sql => "sql",
            Self::Build => "build",
            Self::ContainerRegistry => "container_registry",
            Self::Mobile => "mobile",
            Self::Blank => "blank",
            Self::Git => "git",
            Self::Deployment => "deployment",
        }
    }

    /// Dotted `provider.category.name` path, e.g. `gcp.network.dns`.
    pub fn path(self) -> &'static str {
        match self {
            Self::KubernetesEngine => "gcp.compute.kubernetes_engine",
            Self::Iap => "gcp.security.iap",
            Self::LoadBalancing => "gcp.network.load_balancing",
            Self::Dns => "gcp.network.dns",
            Self::Vpc => "gcp.network.vpc",
            Self::Cdn => "gcp.network.cdn",
            Self::Sql => "gcp.database.sql",
            Self::Build => "gcp.devtools.build",
            Self::ContainerRegistry => "gcp.devtools.container_registry",
            Self::Mobile => "generic.device.mobile",
            Self::Blank => "generic.blank.blank",
            Self::Git => "onprem.vcs.git",
            Self::Deployment => "k8s.compute.deployment",
        }
    }

    pub fn style(self) -> NodeStyle {
        let (shape, fillcolor, color) = match self {
            Self::KubernetesEngine => ("box3d", "#AECBFA", GCP_BLUE),
            Self::Iap => ("octagon", "#FCE8E6", "#EA4335"),
            Self::LoadBalancing => ("invtrapezium", "#D2E3FC", GCP_BLUE),
            Self::Dns => ("ellipse", "#D2E3FC", GCP_BLUE),
            Self::Vpc => ("box", "#D2E3FC", GCP_BLUE),
            Self::Cdn => ("hexagon", "#D2E3FC", GCP_BLUE),
            Self::Sql => ("cylinder", "#CEEAD6", "#34A853"),
            Self::Build => ("component", "#FEEFC3", "#FBBC04"),
            Self::ContainerRegistry => ("tab", "#FEEFC3", "#FBBC04"),
            Self::Mobile => ("box", "#E8EAED", NEUTRAL),
            Self::Blank => ("plaintext", "none", "none"),
            Self::Git => ("folder", "#FAD2C2", "#F05033"),
            Self::Deployment => ("box", "#D6E0F5", K8S_BLUE),
        };
        NodeStyle {
            shape,
            fillcolor,
            color,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

impl FromStr for NodeKind {
    type Err = ();

    /// Accepts either the dotted path or the bare name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.path() == s || k.name() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_provider_category_name() {
        for kind in NodeKind::ALL {
            assert_eq!(
                kind.path(),
                format!(
                    "{}.{}.{}",
                    kind.provider().as_str(),
                    kind.category(),
                    kind.name()
                )
            );
        }
    }

    #[test]
    fn from_str_accepts_path_and_name() {
        assert_eq!("gcp.database.sql".parse::<NodeKind>(), Ok(NodeKind::Sql));
        assert_eq!("git".parse::<NodeKind>(), Ok(NodeKind::Git));
        assert!("gcp.database.spanner".parse::<NodeKind>().is_err());
    }

    #[test]
    fn database_kinds_draw_as_cylinders() {
        assert_eq!(NodeKind::Sql.style().shape, "cylinder");
    }
}
