//! Built-in diagrams.

use archdraw_core::{Diagram, DiagramBuilder, EdgeOptions, GraphAttributes, NodeKind, Result};

pub const GKE_GITOPS_TITLE: &str = "Innovate Inc. GKE GitOps Architecture";

/// Innovate Inc.'s production setup: Cloud Build CI pushing images, ArgoCD pulling the desired
/// state into a GKE Autopilot cluster, public ingress in front and Cloud SQL behind.
pub fn gke_gitops() -> Result<Diagram> {
    gke_gitops_with(|_| {})
}

/// Same as [`gke_gitops`], with `configure` applied to the attributes after the blueprint's own.
pub fn gke_gitops_with(configure: impl FnOnce(&mut GraphAttributes)) -> Result<Diagram> {
    let mut b = DiagramBuilder::new(GKE_GITOPS_TITLE);
    b.graph_attr("fontsize", "20")
        .graph_attr("bgcolor", "white")
        .graph_attr("pad", "0.5")
        .graph_attr("splines", "spline")
        .graph_attr("rankdir", "TB")
        .graph_attr("ranksep", "0.8")
        .graph_attr("nodesep", "0.5");

    let users = b.create_node("End Users", NodeKind::Mobile)?;
    let app_repo = b.create_node("Application Code Repo (Source)", NodeKind::Git)?;
    let config_repo = b.create_node("Kubernetes Config Repo (Desired State)", NodeKind::Git)?;

    let registry = b.cluster("1. Continuous Integration (CI)", |b| {
        let build = b.create_node("Cloud Build\n(Build, Test, Push)", NodeKind::Build)?;
        let registry = b.create_node("Artifact Registry\n(Images)", NodeKind::ContainerRegistry)?;
        b.chain(&[app_repo, build, registry], EdgeOptions::new())?;
        Ok(registry)
    })?;

    let project = b.open_cluster("2. innovate-prod Project (GCP)")?;

    let (dns, load_balancer) = b.cluster("Public Ingress", |b| {
        let dns = b.create_node("Cloud DNS", NodeKind::Dns)?;
        let cdn = b.create_node("Cloud CDN", NodeKind::Cdn)?;
        let lb = b.create_node("Global HTTP(S) Load Balancer", NodeKind::LoadBalancing)?;
        b.chain(&[dns, cdn, lb], EdgeOptions::new())?;
        Ok((dns, lb))
    })?;

    let vpc = b.open_cluster("Virtual Private Cloud (VPC)")?;
    let (gke, argo, frontend, backend) = b.cluster("Private Subnets (GKE Autopilot)", |b| {
        let gke = b.create_node("GKE Autopilot Cluster", NodeKind::KubernetesEngine)?;
        let argo = b.create_node("ArgoCD Controller (In-Cluster)", NodeKind::Deployment)?;
        let (frontend, backend) = b.cluster("Application Pods", |b| {
            let frontend = b.create_node("SPA Frontend\n(React)", NodeKind::Deployment)?;
            let backend = b.create_node("API Backend\n(Flask)", NodeKind::Deployment)?;
            b.connect(frontend, backend, EdgeOptions::labeled("Internal REST Calls"))?;
            Ok((frontend, backend))
        })?;
        Ok((gke, argo, frontend, backend))
    })?;
    let db = b.cluster("Database Layer (Managed)", |b| {
        b.create_node("Cloud SQL\n(PostgreSQL, HA)", NodeKind::Sql)
    })?;
    b.close_cluster(vpc)?;
    b.close_cluster(project)?;

    b.connect(users, dns, EdgeOptions::new())?;

    b.connect(config_repo, argo, EdgeOptions::labeled("Pulls Desired State"))?;
    b.connect(
        registry,
        config_repo,
        EdgeOptions::labeled("Image Tag Update").dashed(),
    )?;
    b.connect(argo, gke, EdgeOptions::labeled("Applies Manifests"))?;

    b.connect(load_balancer, frontend, EdgeOptions::new())?;
    b.connect(backend, db, EdgeOptions::labeled("Private DB Connection"))?;

    let admin = b.create_node("IAP/Cloud Shell (Admin)", NodeKind::Iap)?;
    b.connect(admin, gke, EdgeOptions::new())?;

    configure(b.attributes_mut());
    tracing::debug!(blueprint = "gke_gitops", "built blueprint");
    b.finish()
}
