use lakemeta_metadata::TableMetadata;

pub async fn list_partitions(
    metadata: &dyn TableMetadata,
    prefixes: Vec<String>,
) -> anyhow::Result<()> {
    let partitions = if prefixes.is_empty() {
        metadata.get_all_partition_paths().await?
    } else {
        metadata.get_partition_paths_with_prefixes(&prefixes).await?
    };

    let mut partitions = partitions.into_iter().collect::<Vec<_>>();
    partitions.sort();
    for partition in &partitions {
        println!("{}", partition);
    }
    tracing::info!("Found {} partitions", partitions.len());
    Ok(())
}

pub async fn list_files(metadata: &dyn TableMetadata, partitions: Vec<String>) -> anyhow::Result<()> {
    let files = metadata.get_all_files_in_partitions(&partitions).await?;

    let mut listed = files.into_iter().collect::<Vec<_>>();
    listed.sort_by(|a, b| a.0.cmp(&b.0));
    for (partition, mut entries) in listed {
        entries.sort_by(|a, b| a.location.as_ref().cmp(b.location.as_ref()));
        for entry in entries {
            println!(
                "{}\t{}\t{}\t{}",
                partition,
                entry.file_name(),
                entry.size,
                entry.last_modified.to_rfc3339()
            );
        }
    }
    Ok(())
}
