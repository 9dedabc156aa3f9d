/// 将序列切分为连续的有界批次
///
/// 除最后一个批次外，每批正好 `batch_size` 条；末尾不足一批的
/// 余数单独成批，不会被丢弃。`batch_size` 最小按 1 处理。
pub fn into_batches<T>(items: Vec<T>, batch_size: usize) -> Vec<Vec<T>> {
    let batch_size = batch_size.max(1);
    let mut batches = Vec::with_capacity((items.len() + batch_size - 1) / batch_size);

    let mut iter = items.into_iter();
    loop {
        let batch: Vec<T> = iter.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        batches.push(batch);
    }

    batches
}
