use super::dataset::WindowItem;
use burn::{data::dataloader::batcher::Batcher, prelude::*, tensor::TensorData};

#[derive(Clone, new)]
pub struct WindowBatcher<B: Backend> {
    device: B::Device,
}

#[derive(Debug, Clone, new)]
pub struct TrainingBatch<B: Backend> {
    pub inputs: Tensor<B, 2, Int>,  // Input token IDs [batch_size, block_size]
    pub targets: Tensor<B, 2, Int>, // Next-token targets [batch_size, block_size]
}

impl<B: Backend> WindowBatcher<B> {
    /// Rows must share one length; the first row sets it.
    fn stack(&self, rows: &[&Vec<usize>]) -> Tensor<B, 2, Int> {
        let block_size = rows.first().map_or(0, |row| row.len());
        let mut data = Vec::with_capacity(rows.len() * block_size);

        for row in rows {
            debug_assert_eq!(
                row.len(),
                block_size,
                "windows in a batch must have equal length"
            );
            data.extend(row.iter().map(|&token| token as i64));
        }

        Tensor::from_data(TensorData::new(data, [rows.len(), block_size]), &self.device)
    }
}

impl<B: Backend> Batcher<WindowItem, TrainingBatch<B>> for WindowBatcher<B> {
    fn batch(&self, items: Vec<WindowItem>) -> TrainingBatch<B> {
        let inputs: Vec<_> = items.iter().map(|item| &item.inputs).collect();
        let targets: Vec<_> = items.iter().map(|item| &item.targets).collect();

        let inputs = self.stack(&inputs);
        let targets = self.stack(&targets);

        TrainingBatch::new(inputs, targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_training_batch_shapes() {
        let device = <TestBackend as Backend>::Device::default();
        let batcher = WindowBatcher::<TestBackend>::new(device);

        let items = vec![
            WindowItem::new(vec![0, 1, 2], vec![1, 2, 3]),
            WindowItem::new(vec![3, 4, 5], vec![4, 5, 6]),
        ];

        let batch = batcher.batch(items);
        assert_eq!(batch.inputs.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2, 3]);
    }

    #[test]
    fn test_rows_keep_item_order() {
        let batcher = WindowBatcher::<TestBackend>::new(Default::default());

        let items = vec![
            WindowItem::new(vec![5, 6], vec![6, 7]),
            WindowItem::new(vec![1, 2], vec![2, 3]),
        ];

        let batch = batcher.batch(items);
        let inputs: Vec<i64> = batch.inputs.to_data().to_vec().unwrap();
        let targets: Vec<i64> = batch.targets.to_data().to_vec().unwrap();
        assert_eq!(inputs, vec![5, 6, 1, 2]);
        assert_eq!(targets, vec![6, 7, 2, 3]);
    }

    #[test]
    #[should_panic]
    fn test_rejects_ragged_rows() {
        let batcher = WindowBatcher::<TestBackend>::new(Default::default());

        let items = vec![
            WindowItem::new(vec![0, 1, 2], vec![1, 2, 3]),
            WindowItem::new(vec![3, 4], vec![4, 5]),
        ];

        batcher.batch(items);
    }
}
