//! 后台工作线程池
//!
//! 非阻塞 API 的执行基础：把阻塞的系统调用提交到固定规模的
//! 后台线程池，通过 oneshot 通道把结果送回调用方的 Future。
//!
//! 池在首次使用时惰性启动，进程生命周期内常驻。
//! 队列是简单 FIFO（Mutex + Condvar），不做优先级、
//! 不做取消：任务一旦提交就运行到完成。

use std::collections::VecDeque;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;

use futures::channel::oneshot;
use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex};

use crate::consts::{MAX_WORKER_THREADS, WORKER_THREAD_NAME};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Pool {
    queue: Mutex<VecDeque<Job>>,
    cv: Condvar,
}

impl Pool {
    fn submit(&self, job: Job) {
        {
            let mut queue = self.queue.lock();
            queue.push_back(job);
        }
        self.cv.notify_one();
    }

    fn next_job(&self) -> Job {
        let mut queue = self.queue.lock();
        loop {
            if let Some(job) = queue.pop_front() {
                return job;
            }
            self.cv.wait(&mut queue);
        }
    }
}

static POOL: Lazy<Arc<Pool>> = Lazy::new(|| {
    let pool = Arc::new(Pool {
        queue: Mutex::new(VecDeque::new()),
        cv: Condvar::new(),
    });

    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_WORKER_THREADS);
    log::debug!("[POOL] starting {} worker threads", workers);

    for i in 0..workers {
        let pool = Arc::clone(&pool);
        thread::Builder::new()
            .name(format!("{WORKER_THREAD_NAME}-{i}"))
            .spawn(move || loop {
                let job = pool.next_job();
                // 任务 panic 只能丢弃该任务（发送端随之丢弃，句柄收到
                // Canceled），不能带走工作线程，否则池会逐渐饿死
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    log::warn!("[POOL] job panicked on worker thread");
                }
            })
            .expect("failed to spawn worker thread");
    }

    pool
});

/// 已提交任务的完成句柄
///
/// `await` 返回任务闭包的返回值。任务 panic 导致发送端被丢弃时
/// 返回 [`oneshot::Canceled`]。
pub struct JoinHandle<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Future for JoinHandle<T> {
    type Output = Result<T, oneshot::Canceled>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx).poll(cx)
    }
}

/// 把阻塞闭包提交到后台线程池执行
///
/// 调用方在 `await` 期间不被阻塞；闭包在某个工作线程上
/// 运行到完成后，结果经 oneshot 通道送达返回的句柄。
pub fn spawn_blocking<F, T>(f: F) -> JoinHandle<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel::<T>();

    POOL.submit(Box::new(move || {
        // 接收端已被丢弃时结果直接丢弃
        let _ = tx.send(f());
    }));

    JoinHandle { rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn test_spawn_blocking_returns_value() {
        let result = block_on(spawn_blocking(|| 41 + 1));
        assert_eq!(result, Ok(42));
    }

    #[test]
    fn test_spawn_blocking_runs_on_worker_thread() {
        let name = block_on(spawn_blocking(|| {
            thread::current().name().map(|n| n.to_owned())
        }))
        .expect("join");
        let name = name.expect("worker thread has a name");
        assert!(name.starts_with(WORKER_THREAD_NAME));
    }

    #[test]
    fn test_panicking_job_yields_canceled() {
        let handle = spawn_blocking(|| -> () { panic!("job failure") });
        assert!(block_on(handle).is_err());
    }

    #[test]
    fn test_pool_survives_panicking_jobs() {
        // 比工作线程数更多的 panic 任务也不能让池饿死，
        // 之后的健康任务必须照常完成
        for _ in 0..MAX_WORKER_THREADS + 1 {
            let handle = spawn_blocking(|| -> () { panic!("job failure") });
            assert!(block_on(handle).is_err());
        }
        assert_eq!(block_on(spawn_blocking(|| 7)), Ok(7));
    }

    #[test]
    fn test_many_jobs_all_complete() {
        let handles: Vec<_> = (0..64u64).map(|i| spawn_blocking(move || i * 2)).collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(block_on(handle), Ok(i as u64 * 2));
        }
    }
}
