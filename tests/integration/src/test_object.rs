//! Object and bucket lifecycle integration tests.

#[cfg(test)]
mod tests {
    use bucketgate_core::GatewayErrorKind;

    use crate::{client_with_bucket, test_bucket_name};

    #[test]
    fn test_should_store_list_and_remove_objects() {
        let (client, _bucket) = client_with_bucket("objects");
        for path in ["/docs/a.txt", "docs/b.txt/", "images/c.png"] {
            client.put_object_by_content(None, path, "data").unwrap();
        }

        let keys: Vec<String> = client
            .list_all_objects(None, "docs/")
            .unwrap()
            .into_iter()
            .map(|o| o.key)
            .collect();
        assert_eq!(keys, ["docs/a.txt", "docs/b.txt"]);

        let listed = client.list_objects(None, "").unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|o| o.size == 4));

        client.remove_objects(None, keys).unwrap();
        client.remove_object(None, "images/c.png").unwrap();
        assert!(client.list_objects(None, "").unwrap().is_empty());
    }

    #[test]
    fn test_should_copy_across_buckets() {
        let (client, bucket) = client_with_bucket("copy");
        let other = test_bucket_name("copy-target");
        client.create_bucket(Some(&other)).unwrap();
        client.put_object_by_content(None, "src.txt", "payload").unwrap();

        let key = client
            .copy_object(None, "src.txt", Some(&other), Some("dst.txt"))
            .unwrap();
        assert_eq!(client.get_object(Some(&other), &key).unwrap(), "payload");

        let key = client.copy_object(Some(&bucket), "src.txt", None, None).unwrap();
        assert!(key.starts_with("copy_") && key.ends_with("_src.txt"));
        assert_eq!(client.get_object(None, &key).unwrap(), "payload");

        let err = client.copy_object(None, "missing.txt", None, None).unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::NoSuchKey);
    }

    #[test]
    fn test_should_store_under_generated_name() {
        let (client, _bucket) = client_with_bucket("generated");
        let key = client
            .put_object_with_generated_name(None, "report.pdf", vec![0_u8; 16])
            .unwrap();
        assert!(key.ends_with(".pdf"));
        assert_eq!(client.get_object(None, &key).unwrap().len(), 16);
    }

    #[test]
    fn test_should_delete_bucket_only_when_empty() {
        let (client, bucket) = client_with_bucket("lifecycle");
        client.put_object_by_content(None, "k", "v").unwrap();

        let err = client.delete_bucket(None).unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::BucketNotEmpty);

        client.remove_object(None, "k").unwrap();
        client.delete_bucket(None).unwrap();
        assert!(
            client
                .list_buckets()
                .unwrap()
                .iter()
                .all(|b| b.name != bucket)
        );
    }

    #[test]
    fn test_should_reject_invalid_bucket_name() {
        let (client, _bucket) = client_with_bucket("names");
        let err = client.create_bucket(Some("Invalid_Bucket")).unwrap_err();
        assert_eq!(err.kind(), GatewayErrorKind::InvalidBucketName);
    }
}
