//! Little-endian primitives shared by every record.

use std::io::{self, Read, Write};

use wc_core::{Koord, TilePos};

pub fn write_u32<W: Write>(w: &mut W, v: u32) -> io::Result<()> {
    w.write_all(&v.to_le_bytes())
}

pub fn read_u32<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

pub fn read_u8<R: Read>(r: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_i16<R: Read>(r: &mut R) -> io::Result<i16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(i16::from_le_bytes(buf))
}

/// Destination: `x: i16, y: i16`.
pub fn write_koord<W: Write>(w: &mut W, k: Koord) -> io::Result<()> {
    w.write_all(&k.x.to_le_bytes())?;
    w.write_all(&k.y.to_le_bytes())
}

pub fn read_koord<R: Read>(r: &mut R) -> io::Result<Koord> {
    let x = read_i16(r)?;
    let y = read_i16(r)?;
    Ok(Koord::new(x, y))
}

/// Tile position: `x: i16, y: i16, z: i8`.
pub fn write_tile_pos<W: Write>(w: &mut W, p: TilePos) -> io::Result<()> {
    w.write_all(&p.x.to_le_bytes())?;
    w.write_all(&p.y.to_le_bytes())?;
    w.write_all(&p.z.to_le_bytes())
}

pub fn read_tile_pos<R: Read>(r: &mut R) -> io::Result<TilePos> {
    let x = read_i16(r)?;
    let y = read_i16(r)?;
    let z = read_u8(r)? as i8;
    Ok(TilePos::new(x, y, z))
}
