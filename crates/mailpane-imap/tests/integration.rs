//! Integration tests driving the client against scripted server dialogue.

#![allow(clippy::unwrap_used)]

use mailpane_imap::{Client, Error, FetchSpec, SeqId};
use tokio_test::io::Builder;

#[tokio::test]
async fn greeting_is_consumed() {
    let mock = Builder::new().read(b"* OK Dovecot ready.\r\n").build();
    let client = Client::from_stream(mock).await;
    assert!(client.is_ok());
}

#[tokio::test]
async fn bye_greeting_is_an_error() {
    let mock = Builder::new()
        .read(b"* BYE too many connections\r\n")
        .build();
    let result = Client::from_stream(mock).await;
    assert!(matches!(result, Err(Error::Bye(_))));
}

#[tokio::test]
async fn login_select_and_list() {
    let mock = Builder::new()
        .read(b"* OK ready\r\n")
        .write(b"A0000 LOGIN alice@example.com hunter2pass\r\n")
        .read(b"A0000 OK LOGIN completed\r\n")
        .write(b"A0001 SELECT INBOX\r\n")
        .read(b"* 3 EXISTS\r\n")
        .read(b"* FLAGS (\\Answered \\Seen)\r\n")
        .read(b"A0001 OK [READ-WRITE] SELECT completed\r\n")
        .write(b"A0002 SEARCH ALL\r\n")
        .read(b"* SEARCH 1 2 3\r\n")
        .read(b"A0002 OK SEARCH completed\r\n")
        .build();

    let client = Client::from_stream(mock).await.unwrap();
    let client = client.login("alice@example.com", "hunter2pass").await.unwrap();
    let (mut client, exists) = client.select("INBOX").await.unwrap();
    assert_eq!(exists, 3);

    let ids = client.search_all().await.unwrap();
    let values: Vec<u32> = ids.iter().map(|id| id.get()).collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[tokio::test]
async fn login_failure_reports_server_text() {
    let mock = Builder::new()
        .read(b"* OK ready\r\n")
        .write(b"A0000 LOGIN alice wrong\r\n")
        .read(b"A0000 NO [AUTHENTICATIONFAILED] Invalid credentials\r\n")
        .build();

    let client = Client::from_stream(mock).await.unwrap();
    let result = client.login("alice", "wrong").await;

    match result {
        Err(Error::No(text)) => assert!(text.contains("Invalid credentials")),
        other => panic!("expected NO error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_returns_literal_payload() {
    let mock = Builder::new()
        .read(b"* OK ready\r\n")
        .write(b"A0000 LOGIN alice pw123456\r\n")
        .read(b"A0000 OK done\r\n")
        .write(b"A0001 SELECT INBOX\r\n")
        .read(b"* 1 EXISTS\r\n")
        .read(b"A0001 OK done\r\n")
        .write(b"A0002 FETCH 1 BODY.PEEK[HEADER.FIELDS (FROM SUBJECT DATE)]\r\n")
        .read(b"* 1 FETCH (BODY[HEADER.FIELDS (FROM SUBJECT DATE)] {26}\r\nSubject: hi\r\nFrom: a@b.c\r\n)\r\n")
        .read(b"A0002 OK FETCH completed\r\n")
        .build();

    let client = Client::from_stream(mock).await.unwrap();
    let client = client.login("alice", "pw123456").await.unwrap();
    let (mut client, _) = client.select("INBOX").await.unwrap();

    let payload = client
        .fetch(SeqId::new(1).unwrap(), FetchSpec::Headers)
        .await
        .unwrap();
    assert_eq!(payload, b"Subject: hi\r\nFrom: a@b.c\r\n");
}

#[tokio::test]
async fn fetch_of_missing_message_is_an_error() {
    let mock = Builder::new()
        .read(b"* OK ready\r\n")
        .write(b"A0000 LOGIN alice pw123456\r\n")
        .read(b"A0000 OK done\r\n")
        .write(b"A0001 SELECT INBOX\r\n")
        .read(b"* 0 EXISTS\r\n")
        .read(b"A0001 OK done\r\n")
        .write(b"A0002 FETCH 9 BODY.PEEK[]\r\n")
        .read(b"A0002 NO no such message\r\n")
        .build();

    let client = Client::from_stream(mock).await.unwrap();
    let client = client.login("alice", "pw123456").await.unwrap();
    let (mut client, _) = client.select("INBOX").await.unwrap();

    let result = client.fetch(SeqId::new(9).unwrap(), FetchSpec::Full).await;
    assert!(matches!(result, Err(Error::No(_))));
}

#[tokio::test]
async fn logout_completes_the_session() {
    let mock = Builder::new()
        .read(b"* OK ready\r\n")
        .write(b"A0000 LOGOUT\r\n")
        .read(b"* BYE see you\r\n")
        .read(b"A0000 OK LOGOUT completed\r\n")
        .build();

    let client = Client::from_stream(mock).await.unwrap();
    assert!(client.logout().await.is_ok());
}

#[tokio::test]
async fn empty_search_result() {
    let mock = Builder::new()
        .read(b"* OK ready\r\n")
        .write(b"A0000 LOGIN alice pw123456\r\n")
        .read(b"A0000 OK done\r\n")
        .write(b"A0001 SELECT Empty\r\n")
        .read(b"* 0 EXISTS\r\n")
        .read(b"A0001 OK done\r\n")
        .write(b"A0002 SEARCH ALL\r\n")
        .read(b"* SEARCH\r\n")
        .read(b"A0002 OK done\r\n")
        .build();

    let client = Client::from_stream(mock).await.unwrap();
    let client = client.login("alice", "pw123456").await.unwrap();
    let (mut client, exists) = client.select("Empty").await.unwrap();
    assert_eq!(exists, 0);

    let ids = client.search_all().await.unwrap();
    assert!(ids.is_empty());
}
