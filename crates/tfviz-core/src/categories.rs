//! Resource kind to presentation category lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Coarse semantic grouping of a resource, used for presentation only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Networking,
    Compute,
    Storage,
    Database,
    Security,
    Analytics,
    Container,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Networking,
        Self::Compute,
        Self::Storage,
        Self::Database,
        Self::Security,
        Self::Analytics,
        Self::Container,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Networking => "networking",
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::Database => "database",
            Self::Security => "security",
            Self::Analytics => "analytics",
            Self::Container => "container",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const BUILTIN_KINDS: &[(&str, Category)] = &[
    // Networking
    ("aws_vpc", Category::Networking),
    ("aws_subnet", Category::Networking),
    ("aws_route_table", Category::Networking),
    ("aws_route", Category::Networking),
    ("aws_internet_gateway", Category::Networking),
    ("aws_nat_gateway", Category::Networking),
    ("aws_network_interface", Category::Networking),
    ("aws_security_group", Category::Networking),
    ("aws_security_group_rule", Category::Networking),
    ("aws_network_acl", Category::Networking),
    ("aws_network_acl_rule", Category::Networking),
    ("aws_vpc_endpoint", Category::Networking),
    ("aws_vpc_peering_connection", Category::Networking),
    ("aws_lb", Category::Networking),
    ("aws_lb_listener", Category::Networking),
    ("aws_lb_target_group", Category::Networking),
    ("aws_eip", Category::Networking),
    ("aws_route_table_association", Category::Networking),
    ("aws_route53_zone", Category::Networking),
    ("aws_route53_record", Category::Networking),
    ("aws_cloudfront_distribution", Category::Networking),
    // Compute
    ("aws_instance", Category::Compute),
    ("aws_launch_template", Category::Compute),
    ("aws_autoscaling_group", Category::Compute),
    ("aws_lambda_function", Category::Compute),
    // Storage
    ("aws_s3_bucket", Category::Storage),
    ("aws_ebs_volume", Category::Storage),
    ("aws_efs_file_system", Category::Storage),
    ("aws_s3_bucket_policy", Category::Storage),
    ("aws_efs_mount_target", Category::Storage),
    // Database
    ("aws_db_instance", Category::Database),
    ("aws_db_subnet_group", Category::Database),
    ("aws_rds_cluster", Category::Database),
    ("aws_rds_cluster_instance", Category::Database),
    ("aws_dynamodb_table", Category::Database),
    ("aws_elasticache_cluster", Category::Database),
    ("aws_elasticache_replication_group", Category::Database),
    // Security
    ("aws_iam_role", Category::Security),
    ("aws_iam_policy", Category::Security),
    ("aws_iam_role_policy", Category::Security),
    ("aws_iam_role_policy_attachment", Category::Security),
    ("aws_iam_instance_profile", Category::Security),
    ("aws_iam_user", Category::Security),
    ("aws_kms_key", Category::Security),
    ("aws_acm_certificate", Category::Security),
    ("aws_secretsmanager_secret", Category::Security),
    ("aws_wafv2_web_acl", Category::Security),
    // Analytics
    ("aws_kinesis_stream", Category::Analytics),
    ("aws_kinesis_firehose_delivery_stream", Category::Analytics),
    ("aws_athena_workgroup", Category::Analytics),
    ("aws_glue_job", Category::Analytics),
    ("aws_glue_catalog_database", Category::Analytics),
    ("aws_emr_cluster", Category::Analytics),
    ("aws_redshift_cluster", Category::Analytics),
    ("aws_opensearch_domain", Category::Analytics),
    // Container
    ("aws_ecs_cluster", Category::Container),
    ("aws_ecs_service", Category::Container),
    ("aws_ecs_task_definition", Category::Container),
    ("aws_ecr_repository", Category::Container),
    ("aws_eks_cluster", Category::Container),
    ("aws_eks_node_group", Category::Container),
];

static BUILTIN_TABLE: LazyLock<CategoryTable> = LazyLock::new(|| CategoryTable {
    kinds: BUILTIN_KINDS
        .iter()
        .map(|(kind, category)| (kind.to_string(), *category))
        .collect(),
});

/// Immutable kind → category table with an `Other` fallback.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    kinds: HashMap<String, Category>,
}

impl CategoryTable {
    /// The process-wide builtin table.
    pub fn builtin() -> &'static CategoryTable {
        &BUILTIN_TABLE
    }

    /// A new table where `overrides` take precedence over the builtin entries.
    pub fn with_overrides(overrides: &HashMap<String, Category>) -> Self {
        let mut kinds = BUILTIN_TABLE.kinds.clone();
        kinds.extend(overrides.iter().map(|(k, c)| (k.clone(), *c)));
        Self { kinds }
    }

    /// Exact, case-sensitive lookup. Unknown kinds are `Other`.
    pub fn classify(&self, kind: &str) -> Category {
        self.kinds.get(kind).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Classify a kind against the builtin table.
pub fn classify(kind: &str) -> Category {
    CategoryTable::builtin().classify(kind)
}
