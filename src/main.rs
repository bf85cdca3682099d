use core::{convert::Infallible, pin::pin, time::Duration};
use db::{Config, Database, NoTls};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, runtime::Runtime, signal, time};

/// How long the database connection may take to wind down after shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let port = env::var("PORT")?.parse()?;
    let user = env::var("PG_USERNAME")?;
    let pass = env::var("PG_PASSWORD")?;
    let host = env::var("PG_HOSTNAME")?;
    let data = env::var("PG_DATABASE")?;
    let pg_port = match env::var("PG_PORT") {
        Ok(pg_port) => pg_port.parse()?,
        _ => 5432,
    };

    let mut config = Config::new();
    config.user(&user).password(&pass).host(&host).dbname(&data).port(pg_port);

    let runtime = Runtime::new()?;
    runtime.block_on(run(port, config))
}

async fn run(port: u16, config: Config) -> anyhow::Result<()> {
    // Open the store before accepting any connection
    let (client, conn) = config.connect(NoTls).await?;
    let driver = tokio::spawn(conn);
    let db = Database::from(client);
    db.init_schema().await?;
    let db = Arc::new(db);

    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, port).into();
    let tcp = TcpListener::bind(addr).await?;
    log::info!("listening on {addr}");

    let mut stop = pin!(signal::ctrl_c());
    loop {
        let (stream, peer) = tokio::select! {
            biased;
            res = &mut stop => {
                res?;
                break;
            }
            res = tcp.accept() => match res {
                Ok(pair) => pair,
                Err(err) => {
                    log::error!("failed to accept connection: {err}");
                    continue;
                }
            },
        };

        let db_outer = db.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let db_inner = db_outer.clone();
                async move { Ok::<_, Infallible>(api::try_respond(req, &*db_inner).await) }
            });
            if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
                log::warn!("connection with {peer} failed: {err}");
            }
        });
    }

    // Close the store once the last in-flight request lets go of it
    log::info!("shutting down");
    drop(db);
    match time::timeout(SHUTDOWN_GRACE, driver).await {
        Ok(res) => res??,
        Err(_) => log::warn!("database connection still busy after {SHUTDOWN_GRACE:?}"),
    }

    Ok(())
}
