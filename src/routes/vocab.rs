use handle_errors::Error;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use validator::Validate;
use warp::http::StatusCode;
use warp::Filter;

use crate::store::Store;
use crate::types::vocab::{NewVocab, UpdateVocab};

pub async fn add_vocab(
    store: Store,
    vocab: NewVocab,
) -> Result<impl warp::Reply, warp::Rejection> {
    vocab.validate().map_err(Error::Validation)?;
    let vocab = store.add_vocab(vocab).await?;
    Ok(warp::reply::with_status(
        warp::reply::json(&vocab),
        StatusCode::CREATED,
    ))
}

pub async fn list_vocabs(store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let vocabs = store.get_vocabs().await?;
    Ok(warp::reply::json(&vocabs))
}

pub async fn show_vocab(id: String, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let id = percent_decode_str(&id).decode_utf8_lossy();
    let vocab = store.get_vocab(id.as_ref()).await?;
    Ok(warp::reply::json(&vocab))
}

pub async fn update_vocab(
    id: String,
    store: Store,
    vocab: UpdateVocab,
) -> Result<impl warp::Reply, warp::Rejection> {
    let id = percent_decode_str(&id).decode_utf8_lossy();
    vocab.validate().map_err(Error::Validation)?;
    let vocab = store.update_vocab(id.as_ref(), vocab).await?;
    Ok(warp::reply::json(&vocab))
}

pub async fn delete_vocab(id: String, store: Store) -> Result<impl warp::Reply, warp::Rejection> {
    let id = percent_decode_str(&id).decode_utf8_lossy();
    store.delete_vocab(id.as_ref()).await?;
    Ok(warp::reply::with_status(
        warp::reply(),
        StatusCode::NO_CONTENT,
    ))
}

fn json_body<T: DeserializeOwned + Send>(
) -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(1024 * 16).and(warp::body::json())
}

/// `/` and `/{id}` for the vocabs collection. Paths are matched before
/// methods so an unknown path is a 404 rather than a 405. Rejections are left
/// for `handle_errors::return_error`.
pub fn vocab_routes(
    store: Store,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let create = warp::path::end()
        .and(warp::post())
        .and(store_filter.clone())
        .and(json_body::<NewVocab>())
        .and_then(add_vocab);

    let list = warp::path::end()
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(list_vocabs);

    let show = warp::path::param::<String>()
        .and(warp::path::end())
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(show_vocab);

    let update = warp::path::param::<String>()
        .and(warp::path::end())
        .and(warp::put())
        .and(store_filter.clone())
        .and(json_body::<UpdateVocab>())
        .and_then(update_vocab);

    let delete = warp::path::param::<String>()
        .and(warp::path::end())
        .and(warp::delete())
        .and(store_filter)
        .and_then(delete_vocab);

    create.or(list).or(show).or(update).or(delete)
}
