//! Branch resource.

use crate::rest::resources::{Commit, COMMIT_KIND};
use crate::rest::ResourceKind;

static BRANCH_KEY_MAPPINGS: [(&str, &ResourceKind); 1] = [("commit", &COMMIT_KIND)];

/// Capability table for [`Branch`].
///
/// Branch documents do not carry their repository, so there is no canonical
/// URL; fetch branches again through [`Repo::get_branch`](crate::rest::resources::Repo::get_branch).
pub static BRANCH_KIND: ResourceKind = ResourceKind {
    name: "Branch",
    url: None,
    default_urls: &[],
    key_mappings: &BRANCH_KEY_MAPPINGS,
};

github_resource! {
    /// A named branch and its head commit.
    Branch => BRANCH_KIND
}

impl Branch {
    field_accessors! {
        name: &str;
        commit: nested Commit;
        protected: bool;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockTransport;
    use crate::rest::resources::test_support::build;
    use crate::rest::ResourceError;
    use serde_json::json;

    #[test]
    fn test_branch_commit_is_nested_commit() {
        let branch: Branch = build(
            &MockTransport::new(),
            json!({
                "name": "main",
                "protected": true,
                "commit": {
                    "sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc",
                    "url": "https://api.github.com/repos/octocat/Hello-World/commits/c5b97d5"
                }
            }),
        );

        assert!(branch.protected().unwrap());
        let commit = branch.commit().unwrap();
        assert_eq!(commit.kind(), &COMMIT_KIND);
        assert_eq!(commit.sha().unwrap(), "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc");
    }

    #[tokio::test]
    async fn test_branch_cannot_refresh() {
        let mut branch: Branch = build(&MockTransport::new(), json!({"name": "main"}));
        assert!(matches!(
            branch.refresh().await,
            Err(ResourceError::InvalidRelation { resource: "Branch", .. })
        ));
    }
}
