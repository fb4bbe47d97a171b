//! 异步模型加载
//!
//! 读取和解码在独立线程上进行，通过 flume 通道把进度和最终结果送回
//! 主线程。[`LoadTask::poll`] 每帧在主线程上调用，保证结果只落地一次。

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread;

use flume::{Receiver, TryRecvError};

use crate::assets::gltf::{ModelPrefab, decode_prefab};
use crate::errors::{Result, ViewerError};

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// 加载线程发往主线程的消息
enum LoadMessage {
    /// 已读取字节数 / 总字节数（未知时为 None）
    Progress { loaded: u64, total: Option<u64> },
    /// 终态，每个任务恰好发送一次
    Done(Box<Result<ModelPrefab>>),
}

/// 加载任务的外部可见状态
#[derive(Debug, Clone)]
pub enum LoadState {
    /// 加载线程仍在工作
    Pending,
    /// 解码完成，Prefab 已被取走
    Ready,
    /// 终态失败；后续 poll 不会再改变状态
    Failed(String),
}

/// 一次后台模型加载
///
/// 持有通道接收端；加载线程结束后自行退出，不需要 join。
pub struct LoadTask {
    uri: PathBuf,
    receiver: Receiver<LoadMessage>,
    state: LoadState,
    progress: (u64, Option<u64>),
}

impl LoadTask {
    /// 启动后台加载线程
    pub fn spawn(path: impl AsRef<Path>) -> Self {
        let uri = path.as_ref().to_path_buf();
        let (sender, receiver) = flume::unbounded();

        let thread_uri = uri.clone();
        thread::Builder::new()
            .name("asset-load".to_string())
            .spawn(move || {
                let result = load_and_decode(&thread_uri, |loaded, total| {
                    // 主线程退出后发送失败是正常的，忽略
                    let _ = sender.send(LoadMessage::Progress { loaded, total });
                });
                let _ = sender.send(LoadMessage::Done(Box::new(result)));
            })
            .expect("failed to spawn asset load thread");

        Self {
            uri,
            receiver,
            state: LoadState::Pending,
            progress: (0, None),
        }
    }

    /// 任务对应的资源路径
    #[must_use]
    pub fn uri(&self) -> &Path {
        &self.uri
    }

    /// 最近一次报告的加载进度（已读字节数，总字节数）
    #[must_use]
    pub fn progress(&self) -> (u64, Option<u64>) {
        self.progress
    }

    /// 当前状态快照
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// 排空通道并返回本次 poll 落地的结果
    ///
    /// 任务的终态恰好产生一次：成功时返回 `Some(Ok(prefab))`，失败时
    /// 返回 `Some(Err(..))` 并把状态固定为 Failed。之后的 poll 永远
    /// 返回 None。加载线程在发出终态前断开通道也算失败。
    pub fn poll(&mut self) -> Option<Result<ModelPrefab>> {
        self.poll_with(|_, _| {})
    }

    /// 同 [`poll`](Self::poll)，但把中间进度转发给回调
    pub fn poll_with(
        &mut self,
        mut on_progress: impl FnMut(u64, Option<u64>),
    ) -> Option<Result<ModelPrefab>> {
        if !matches!(self.state, LoadState::Pending) {
            return None;
        }

        loop {
            match self.receiver.try_recv() {
                Ok(LoadMessage::Progress { loaded, total }) => {
                    self.progress = (loaded, total);
                    on_progress(loaded, total);
                }
                Ok(LoadMessage::Done(result)) => {
                    return Some(self.resolve(*result));
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    return Some(self.resolve(Err(ViewerError::LoadTaskDisconnected)));
                }
            }
        }
    }

    fn resolve(&mut self, result: Result<ModelPrefab>) -> Result<ModelPrefab> {
        match &result {
            Ok(_) => self.state = LoadState::Ready,
            Err(err) => self.state = LoadState::Failed(err.to_string()),
        }
        result
    }
}

/// 分块读取文件并解码，边读边上报进度
fn load_and_decode(
    path: &Path,
    mut on_progress: impl FnMut(u64, Option<u64>),
) -> Result<ModelPrefab> {
    let mut file = File::open(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ViewerError::AssetNotFound(path.display().to_string())
        } else {
            ViewerError::IoError(err)
        }
    })?;

    let total = file.metadata().ok().map(|m| m.len());
    let mut bytes = Vec::with_capacity(total.unwrap_or(0).min(u64::from(u32::MAX)) as usize);
    let mut chunk = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);
        on_progress(bytes.len() as u64, total);
    }

    decode_prefab(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_resolves_exactly_once() {
        let mut task = LoadTask::spawn("definitely/does/not/exist.gltf");

        // 等待加载线程结束
        let result = loop {
            if let Some(result) = task.poll() {
                break result;
            }
            thread::yield_now();
        };

        assert!(matches!(result, Err(ViewerError::AssetNotFound(_))));
        assert!(matches!(task.state(), LoadState::Failed(_)));

        // 终态之后不再产生结果
        assert!(task.poll().is_none());
        assert!(task.poll().is_none());
    }
}
