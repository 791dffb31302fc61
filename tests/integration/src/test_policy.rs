//! Bucket policy integration tests.

#[cfg(test)]
mod tests {
    use bucketgate_access::{PolicyUpdate, StorageGateway};
    use bucketgate_core::GatewayErrorKind;
    use bucketgate_policy::{PermissionGroup, PermissionSpecification, compile};

    use crate::client_with_bucket;

    #[test]
    fn test_should_attach_compiled_read_write_policy() {
        let (client, bucket) = client_with_bucket("policy");
        let spec = PermissionSpecification::from_json(
            r#"{"read": ["public/", "docs/"], "write": ["inbox/"]}"#,
        )
        .unwrap();

        let PolicyUpdate::Applied(document) = client.set_bucket_policies(None, &spec).unwrap()
        else {
            panic!("read and write is a supported combination");
        };
        assert_eq!(document, compile(&spec, &bucket).unwrap());

        let stored = client.gateway().get_bucket_policy(&bucket).unwrap();
        assert_eq!(stored, document.to_json().unwrap());

        let policy = client.bucket_policy(None).unwrap();
        let statements = policy["Statement"].as_array().unwrap();
        assert_eq!(statements.len(), 4);
        assert_eq!(
            statements[1]["Condition"]["StringEquals"]["s3:prefix"],
            serde_json::json!(["public/", "docs/"])
        );
        assert_eq!(
            statements[3]["Resource"],
            serde_json::json!([format!("arn:aws:s3:::{bucket}/inbox/*")])
        );
    }

    #[test]
    fn test_should_replace_policy_and_delete_it() {
        let (client, bucket) = client_with_bucket("replace");
        let read = PermissionSpecification::new().with_group(PermissionGroup::Read, ["a"]);
        let write = PermissionSpecification::new().with_group(PermissionGroup::Write, ["b"]);

        client.set_bucket_policies(None, &read).unwrap();
        client.set_bucket_policies(Some(&bucket), &write).unwrap();
        let policy = client.bucket_policy(None).unwrap();
        assert_eq!(policy["Statement"].as_array().unwrap().len(), 2);

        client.delete_bucket_policies(None).unwrap();
        let err = client.bucket_policy(None).unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::NoSuchBucketPolicy);
    }

    #[test]
    fn test_should_leave_existing_policy_for_unsupported_groups() {
        let (client, _bucket) = client_with_bucket("unsupported");
        let read = PermissionSpecification::new().with_group(PermissionGroup::Read, ["a"]);
        client.set_bucket_policies(None, &read).unwrap();
        let before = client.bucket_policy(None).unwrap();

        for input in ["{}", r#"{"admin": ["x"]}"#, r#"{"read": ["a"], "owner": ["b"]}"#] {
            let spec = PermissionSpecification::from_json(input).unwrap();
            assert_eq!(
                client.set_bucket_policies(None, &spec).unwrap(),
                PolicyUpdate::Unchanged,
                "{input} should not compile"
            );
        }
        assert_eq!(client.bucket_policy(None).unwrap(), before);
    }

    #[test]
    fn test_should_fail_for_missing_bucket() {
        let (client, _bucket) = client_with_bucket("missing");
        let read = PermissionSpecification::new().with_group(PermissionGroup::Read, ["a"]);
        let err = client
            .set_bucket_policies(Some("no-such-bucket"), &read)
            .unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::NoSuchBucket);
        assert_eq!(err.status(), 404);
    }
}
