use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::oneshot;
use webserver::server::Supervisor;

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

async fn wait_for(supervisor: &Supervisor, active: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while supervisor.active() != active {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("registry did not settle");
}

#[tokio::test]
async fn test_worker_is_registered_until_it_finishes() {
    let supervisor = Supervisor::start();
    let (release_tx, release_rx) = oneshot::channel::<()>();

    let id = supervisor.spawn(peer(), async move {
        let _ = release_rx.await;
    });

    assert_eq!(supervisor.active(), 1);
    assert_eq!(supervisor.peer_of(id), Some(peer()));

    release_tx.send(()).unwrap();
    wait_for(&supervisor, 0).await;
    assert_eq!(supervisor.peer_of(id), None);
}

#[tokio::test]
async fn test_worker_ids_are_distinct() {
    let supervisor = Supervisor::start();

    let a = supervisor.spawn(peer(), async {});
    let b = supervisor.spawn(peer(), async {});

    assert_ne!(a, b);
    wait_for(&supervisor, 0).await;
}

#[tokio::test]
async fn test_many_workers_are_all_reaped() {
    let supervisor = Supervisor::start();

    for i in 0..200u64 {
        supervisor.spawn(peer(), async move {
            tokio::time::sleep(Duration::from_millis(i % 7)).await;
        });
    }

    wait_for(&supervisor, 0).await;
}

#[tokio::test]
async fn test_panicking_worker_is_reaped() {
    let supervisor = Supervisor::start();

    supervisor.spawn(peer(), async {
        panic!("worker failure");
    });

    wait_for(&supervisor, 0).await;
}
