use std::io;
use stepline::{
    Config, Request, Response,
    body::{Iter, ReadStream},
    error::BoxError,
    handler::from_fn,
    headers::standard,
    http::StatusCode,
};
use tokio::{net::TcpListener, runtime::Runtime};

fn main() -> io::Result<()> {
    env_logger::init();

    Runtime::new()?.block_on(async {
        let io = TcpListener::bind("0.0.0.0:3000").await?;
        let config = Config::new().max_body_size(1024 * 1024);

        stepline::rt::serve(io, from_fn(handle), config).await;
        Ok(())
    })
}

fn handle(req: &Request<'_>, res: &mut Response) -> Result<(), BoxError> {
    match req.path() {
        "/" => {
            res.status(StatusCode::OK)
                .date_now()
                .header(standard::CONTENT_TYPE, "text/plain")?
                .send("Hello World!\n");
        }
        "/echo" => {
            let content_type = req.header(standard::CONTENT_TYPE).cloned();
            res.status(StatusCode::OK);
            if let Some(content_type) = content_type {
                res.header_value(standard::CONTENT_TYPE, content_type);
            }
            res.send(req.body().clone());
        }
        "/stream" => {
            res.status(StatusCode::OK)
                .send_stream(Iter::new(["streamed ", "in ", "chunks\n"]));
        }
        "/cargo" => {
            let file = std::fs::File::open("Cargo.toml")?;
            res.status(StatusCode::OK).send_stream(ReadStream::new(file));
        }
        _ => {
            res.status(StatusCode::NOT_FOUND).send("Not Found\n");
        }
    }
    Ok(())
}
