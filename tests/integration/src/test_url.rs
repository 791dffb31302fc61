//! URL resolution integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bucketgate_access::{PublicPathRegistry, StorageClient, UrlAccess};
    use bucketgate_core::{GateConfig, GatewayErrorKind};
    use bucketgate_memory::InMemoryGateway;
    use chrono::{Duration, Utc};

    use crate::{client_with_bucket, test_bucket_name, test_config};

    #[test]
    fn test_should_hand_out_plain_url_for_public_paths() {
        let (client, bucket) = client_with_bucket("public");
        client.put_object_by_content(None, "avatars/1.png", "x").unwrap();
        client.set_public_paths(None, ["avatars/"]).unwrap();

        let resolved = client.object_url(None, "avatars/1.png", None).unwrap();
        assert_eq!(resolved.access, UrlAccess::Public);
        assert_eq!(
            resolved.url,
            format!("http://minio.local:9000/{bucket}/avatars/1.png")
        );
    }

    #[test]
    fn test_should_presign_private_paths_verifiably() {
        let (client, bucket) = client_with_bucket("private");
        client.set_public_paths(None, ["avatars/"]).unwrap();

        let now = Utc::now();
        let expires_at = now + Duration::minutes(5);
        let resolved = client
            .resolver()
            .resolve_url_at(&bucket, "reports/q1.pdf", Some(expires_at), now)
            .unwrap();
        assert_eq!(resolved.expires_at(), Some(expires_at));
        assert!(resolved.url.contains("X-Amz-Expires=300"));
        assert!(resolved.url.contains("X-Amz-Credential=integration%2F"));

        let identity = client
            .gateway()
            .verify_presigned_request(&resolved.url, now)
            .unwrap();
        assert_eq!(identity.access_key_id, "integration");

        let err = client
            .gateway()
            .verify_presigned_request(&resolved.url, expires_at + Duration::seconds(1))
            .unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::AccessDenied);
    }

    #[test]
    fn test_should_reject_url_signed_with_other_credentials() {
        let (client, bucket) = client_with_bucket("foreign");
        let foreign = InMemoryGateway::new(
            GateConfig::builder()
                .endpoint("http://minio.local:9000".to_owned())
                .access_key("integration".to_owned())
                .secret_key("wrong-secret".to_owned())
                .build(),
        );
        let foreign = StorageClient::new(foreign, &test_config(&bucket));

        let url = foreign.presigned_object_url(None, "a.txt", None).unwrap().url;
        let err = client
            .gateway()
            .verify_presigned_request(&url, Utc::now())
            .unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::AccessDenied);
    }

    #[test]
    fn test_should_share_registry_between_clients() {
        let bucket = test_bucket_name("shared");
        let config = test_config(&bucket);
        let registry = Arc::new(PublicPathRegistry::new());
        let gateway = Arc::new(InMemoryGateway::new(config.clone()));

        let writer = StorageClient::from_shared(Arc::clone(&gateway), &config)
            .with_registry(Arc::clone(&registry));
        let reader = StorageClient::from_shared(gateway, &config).with_registry(registry);

        writer.set_public_paths(None, ["*"]).unwrap();
        assert!(reader.object_url(None, "anything", None).unwrap().is_public());

        writer.set_public_paths(None, Vec::<String>::new()).unwrap();
        let resolved = reader.object_url(None, "anything", None).unwrap();
        assert!(!resolved.is_public());
        assert!(resolved.url.contains("X-Amz-Expires=86400"));
    }

    #[test]
    fn test_should_over_match_substring_patterns() {
        let (client, _bucket) = client_with_bucket("substring");
        client.set_public_paths(None, ["img"]).unwrap();
        assert!(client.is_public(None, "private/img_secret.txt").unwrap());
        assert!(!client.is_public(None, "private/doc.txt").unwrap());
    }
}
