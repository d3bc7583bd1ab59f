use std::convert::TryFrom;
use std::ffi::CStr;

use crate::cursor::Cursor;
use crate::error::{DecodeError, DecodeResult};
use crate::protocol::header::Header;
use crate::protocol::question::Question;
use crate::protocol::record::ResourceRecord;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DecodeOptions {
    /// Fail on any record whose data layout is not decoded (everything but
    /// PTR). When off, such records keep their raw bytes.
    pub strict_rdata: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict_rdata: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Section {
    Answer,
    Authority,
    Additional,
}

/// A fully decoded message. Only ever built from a decode that succeeded in
/// every section, with all compressed names already expanded.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Message {
    raw: Vec<u8>,
    header: Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
}

impl Message {
    pub fn decode(bytes: &[u8]) -> DecodeResult<Message> {
        Message::decode_with(bytes, &DecodeOptions::default())
    }

    /// Decodes bytes up to the first NUL.
    pub fn from_cstr(message: &CStr) -> DecodeResult<Message> {
        Message::decode(message.to_bytes())
    }

    pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> DecodeResult<Message> {
        let (header, cursor) = Header::decode(Cursor::from(bytes))?;
        trace!(
            "header decoded: id={} qd={} an={} ns={} ar={}",
            header.get_id(),
            header.get_question_count(),
            header.get_answer_count(),
            header.get_authority_count(),
            header.get_additional_count()
        );
        let (questions, cursor) = decode_questions(cursor, header.get_question_count())?;
        let (answers, cursor) =
            decode_records(cursor, header.get_answer_count(), Section::Answer, options)?;
        let (authorities, cursor) =
            decode_records(cursor, header.get_authority_count(), Section::Authority, options)?;
        let (additionals, cursor) =
            decode_records(cursor, header.get_additional_count(), Section::Additional, options)?;
        if !cursor.is_empty() {
            trace!("{} trailing bytes after the last section", cursor.remaining());
        }
        Ok(Message {
            raw: bytes.to_vec(),
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    pub fn get_raw_message(&self) -> &[u8] {
        &self.raw
    }

    pub fn get_header(&self) -> &Header {
        &self.header
    }

    pub fn get_questions(&self) -> &Vec<Question> {
        &self.questions
    }

    pub fn get_answers(&self) -> &Vec<ResourceRecord> {
        &self.answers
    }

    pub fn get_authorities(&self) -> &Vec<ResourceRecord> {
        &self.authorities
    }

    pub fn get_additionals(&self) -> &Vec<ResourceRecord> {
        &self.additionals
    }
}

impl TryFrom<&[u8]> for Message {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Message::decode(bytes)
    }
}

fn decode_questions(cursor: Cursor<'_>, count: u16) -> DecodeResult<(Vec<Question>, Cursor<'_>)> {
    let message = cursor.get_buffer();
    let mut cursor = cursor;
    let mut questions = Vec::new();
    for index in 0..count {
        let (question, next) = Question::decode(cursor).map_err(|e| {
            trace!("question {} failed at offset {}: {}", index, cursor.get_current_index(), e);
            e
        })?;
        questions.push(question.expand(message)?);
        cursor = next;
    }
    trace!("questions decoded: {}", questions.len());
    Ok((questions, cursor))
}

fn decode_records<'a>(
    cursor: Cursor<'a>,
    count: u16,
    section: Section,
    options: &DecodeOptions,
) -> DecodeResult<(Vec<ResourceRecord>, Cursor<'a>)> {
    let message = cursor.get_buffer();
    let mut cursor = cursor;
    let mut records = Vec::new();
    for index in 0..count {
        let (record, next) = ResourceRecord::decode(cursor, options).map_err(|e| {
            trace!("{:?} record {} failed at offset {}: {}", section, index, cursor.get_current_index(), e);
            e
        })?;
        records.push(record.expand(message)?);
        cursor = next;
    }
    trace!("{:?} section decoded: {}", section, records.len());
    Ok((records, cursor))
}
